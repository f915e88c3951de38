// crates/domain/src/options.rs
use std::{fmt, str::FromStr};

use enc_lines_shared_kernel::DomainError;
use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

/// Process-wide choice of how lines are counted.
///
/// Only [`LineCountMethod::Exact`] gives exact counts. The reader-based methods are kept to
/// compare performance against it and are never selected by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCountMethod {
    /// Byte lookup where CR/LF are unambiguous as bytes, char lookup otherwise.
    #[default]
    Exact,
    /// Line reader that drops an empty last line.
    BufferedReadLine,
    /// Line reader that keeps a pending empty last line.
    CustomReadLine,
    /// Line reader probing whether another line follows.
    CustomHasNextLine,
}

impl LineCountMethod {
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Strategy counting the lines of a file in `encoding` under this method.
    pub const fn strategy_for(self, encoding: Encoding) -> LineCountStrategy {
        match self {
            Self::Exact if encoding.can_search_line_break_as_byte() => LineCountStrategy::ByteLookup,
            Self::Exact => LineCountStrategy::CharLookup,
            Self::BufferedReadLine => LineCountStrategy::BufferedReadLine,
            Self::CustomReadLine => LineCountStrategy::CustomReadLine,
            Self::CustomHasNextLine => LineCountStrategy::CustomHasNextLine,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::BufferedReadLine => "buffered-readline",
            Self::CustomReadLine => "custom-readline",
            Self::CustomHasNextLine => "custom-has-next-line",
        }
    }
}

impl fmt::Display for LineCountMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineCountMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "exact" | "char-or-byte-lookup" => Ok(Self::Exact),
            "buffered-readline" => Ok(Self::BufferedReadLine),
            "custom-readline" => Ok(Self::CustomReadLine),
            "custom-has-next-line" => Ok(Self::CustomHasNextLine),
            _ => Err(DomainError::UnknownLineCountMethod { value: s.to_string() }),
        }
    }
}

/// One concrete line counting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCountStrategy {
    ByteLookup,
    CharLookup,
    BufferedReadLine,
    CustomReadLine,
    CustomHasNextLine,
}

impl LineCountStrategy {
    pub const ALL: [Self; 5] = [
        Self::ByteLookup,
        Self::CharLookup,
        Self::BufferedReadLine,
        Self::CustomReadLine,
        Self::CustomHasNextLine,
    ];

    pub const fn is_exact(self) -> bool {
        matches!(self, Self::ByteLookup | Self::CharLookup)
    }
}
