// crates/domain/src/encoding.rs
use std::{fmt, str::FromStr};

use enc_lines_shared_kernel::DomainError;
use serde::{Deserialize, Serialize};

/// The closed set of encodings the detector can report.
///
/// An unresolvable encoding is modelled as `Option::<Encoding>::None`, never as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16LE")]
    Utf16Le,
    #[serde(rename = "UTF-16BE")]
    Utf16Be,
    #[serde(rename = "UTF-32LE")]
    Utf32Le,
    #[serde(rename = "UTF-32BE")]
    Utf32Be,
    #[serde(rename = "GB18030")]
    Gb18030,
    #[serde(rename = "ISO-8859-1")]
    Iso8859_1,
}

impl Encoding {
    pub const ALL: [Self; 7] = [
        Self::Utf8,
        Self::Utf16Le,
        Self::Utf16Be,
        Self::Utf32Le,
        Self::Utf32Be,
        Self::Gb18030,
        Self::Iso8859_1,
    ];

    /// Canonical name, also used as the key of encoding statistics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Gb18030 => "GB18030",
            Self::Iso8859_1 => "ISO-8859-1",
        }
    }

    /// Length in bytes of the byte-order mark identifying this encoding, 0 when it has none.
    pub const fn bom_len(self) -> usize {
        match self {
            Self::Iso8859_1 => 0,
            Self::Utf16Le | Self::Utf16Be => 2,
            Self::Utf8 => 3,
            Self::Utf32Le | Self::Utf32Be | Self::Gb18030 => 4,
        }
    }

    /// Whether CR and LF can be searched as raw bytes.
    ///
    /// Holds for UTF-8 and single-byte encodings only: there, 0x0D and 0x0A never occur inside
    /// the byte sequence of another character.
    pub const fn can_search_line_break_as_byte(self) -> bool {
        matches!(self, Self::Utf8 | Self::Iso8859_1)
    }

    /// The same encoding family with the opposite byte order, for UTF-16/UTF-32.
    pub const fn swapped_endianness(self) -> Self {
        match self {
            Self::Utf16Le => Self::Utf16Be,
            Self::Utf16Be => Self::Utf16Le,
            Self::Utf32Le => Self::Utf32Be,
            Self::Utf32Be => Self::Utf32Le,
            other => other,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "UTF8" => Ok(Self::Utf8),
            "UTF16LE" => Ok(Self::Utf16Le),
            "UTF16BE" => Ok(Self::Utf16Be),
            "UTF32LE" => Ok(Self::Utf32Le),
            "UTF32BE" => Ok(Self::Utf32Be),
            "GB18030" => Ok(Self::Gb18030),
            "ISO88591" | "LATIN1" => Ok(Self::Iso8859_1),
            _ => Err(DomainError::UnknownEncoding { name: s.to_string() }),
        }
    }
}
