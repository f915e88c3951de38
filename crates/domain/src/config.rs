// crates/domain/src/config.rs
use derive_builder::Builder;
use enc_lines_shared_kernel::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

use crate::{encoding::Encoding, options::LineCountMethod};

/// Chunk size used by the exact strategies when nothing else is configured.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Options recognized by the batch engine.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct BatchConfig {
    pub method: LineCountMethod,
    /// Bytes read per chunk by the exact strategies.
    pub read_buffer_size: usize,
    pub collect_worker_ids: bool,
    pub collect_encoding_stats: bool,
    pub log_per_file: bool,
    /// Log progress every N files; `None` keeps the engine quiet.
    pub progress_frequency: Option<usize>,
    /// Used for files whose encoding could not be detected.
    pub default_encoding: Encoding,
    /// Worker pool size; `None` means one worker per available core.
    pub jobs: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            method: LineCountMethod::Exact,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            collect_worker_ids: false,
            collect_encoding_stats: false,
            log_per_file: false,
            progress_frequency: None,
            default_encoding: Encoding::Utf8,
            jobs: None,
        }
    }
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfiguration`] naming the offending option.
    pub fn validate(&self) -> DomainResult<()> {
        if self.read_buffer_size == 0 {
            return Err(invalid("read_buffer_size must be greater than 0"));
        }
        if self.progress_frequency == Some(0) {
            return Err(invalid("progress_frequency must be greater than 0 when set"));
        }
        if self.jobs == Some(0) {
            return Err(invalid("jobs must be greater than 0 when set"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> DomainError {
    DomainError::InvalidConfiguration { reason: reason.to_string() }
}

impl From<BatchConfigBuilderError> for DomainError {
    fn from(err: BatchConfigBuilderError) -> Self {
        Self::InvalidConfiguration { reason: err.to_string() }
    }
}
