// crates/domain/src/detection.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

/// Statistics key used when neither a BOM nor sampling could name the encoding.
pub const UNKNOWN_ENCODING_NAME: &str = "*UNKNOWN*";

/// Outcome of detecting the encoding of one file.
///
/// `bom_len` is 0 whenever the encoding was guessed; callers that need to know *why* an
/// encoding is certain must look at it, since `is_certain` alone does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub encoding: Option<Encoding>,
    pub is_certain: bool,
    pub bom_len: usize,
}

impl DetectionResult {
    /// Encoding recognized from its byte-order mark.
    pub const fn from_bom(encoding: Encoding) -> Self {
        Self { encoding: Some(encoding), is_certain: true, bom_len: encoding.bom_len() }
    }

    /// Zero-length files are reported as certain UTF-8 so they never show up as unknown.
    pub const fn empty_file() -> Self {
        Self { encoding: Some(Encoding::Utf8), is_certain: true, bom_len: 0 }
    }

    pub const fn guessed(encoding: Option<Encoding>, is_certain: bool) -> Self {
        Self { encoding, is_certain, bom_len: 0 }
    }

    /// Name of the detected encoding, or [`UNKNOWN_ENCODING_NAME`].
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.map_or(UNKNOWN_ENCODING_NAME, Encoding::name)
    }

    /// Statistics bucket of this result for a file of `file_len` bytes.
    pub const fn certainty(&self, file_len: u64) -> EncodingCertainty {
        if self.bom_len != 0 || (self.is_certain && file_len == 0) {
            EncodingCertainty::Certain
        } else if self.is_certain {
            EncodingCertainty::Guessed
        } else {
            EncodingCertainty::Doubtful
        }
    }
}

/// The three mutually exclusive buckets of encoding statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingCertainty {
    /// Provided by a BOM, or an empty file.
    Certain,
    /// Guessed from a sample that covered the whole file.
    Guessed,
    /// Unknown, single-byte fallback, or guessed from a prefix only.
    Doubtful,
}

impl EncodingCertainty {
    pub const ALL: [Self; 3] = [Self::Certain, Self::Guessed, Self::Doubtful];

    pub const fn index(self) -> usize {
        match self {
            Self::Certain => 0,
            Self::Guessed => 1,
            Self::Doubtful => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Certain => "certain",
            Self::Guessed => "guessed",
            Self::Doubtful => "doubtful/unknown",
        }
    }
}

impl fmt::Display for EncodingCertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
