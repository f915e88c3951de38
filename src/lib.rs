//! # enc_lines
//!
//! Encoding detection and line counting over large, heterogeneous file collections.
//!
//! Each file's encoding is read from its byte-order mark, or guessed from a sample of its first
//! bytes: UTF-8, UTF-16 and UTF-32 of either endianness, GB18030, and ISO-8859-1 as the
//! single-byte fallback. Lines are then counted exactly, treating `\r`, `\n` and `\r\n` as
//! terminators, on a pool of worker threads.
//!
//! ```no_run
//! use enc_lines::{BatchConfig, DomainError, count_lines, log_report};
//!
//! let config = BatchConfig::builder().collect_encoding_stats(true).build().map_err(DomainError::from)?;
//! let report = count_lines(&["src/lib.rs", "README.md"], None, &config)?;
//! log_report(&report);
//! println!("{} lines", report.total_lines);
//! # Ok::<(), enc_lines::EncLinesError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

pub use enc_lines_domain::{
    BatchConfig, BatchConfigBuilder, BatchReport, DetectionResult, Encoding, EncodingCertainty,
    EncodingStatistics, LineCountMethod, LineCountStrategy, UNKNOWN_ENCODING_NAME,
};
pub use enc_lines_infra::{FileEncodingDetector, StrategyRegistry, encoding_from_bom, guess_from_sample, strategies};
pub use enc_lines_ports::{EncodingDetector, LineCounter, LineCounterRegistry};
pub use enc_lines_shared_kernel::{
    ByteCount, DomainError, EncLinesError, ErrorContext, InfrastructureError, LineCount, Result,
};
pub use enc_lines_usecase::{BatchEngine, log_report};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Count the lines of `files` with the filesystem detector and the built-in strategies.
///
/// # Errors
///
/// Returns an error when `config` is invalid or the worker pool cannot be created. Unreadable
/// files are reported through [`BatchReport::files_failed`].
pub fn count_lines<P>(files: &[P], threshold: Option<u64>, config: &BatchConfig) -> Result<BatchReport>
where
    P: AsRef<Path> + Sync,
{
    let detector = FileEncodingDetector::new();
    let registry = StrategyRegistry::new(config.read_buffer_size);
    BatchEngine::new(&detector, &registry, config).count_lines(files, threshold)
}

/// Detect the encoding of a single file.
///
/// # Errors
///
/// Fails when the file cannot be opened or read.
pub fn detect_encoding(path: impl AsRef<Path>) -> Result<DetectionResult> {
    FileEncodingDetector::new().detect(path.as_ref())
}
