//! # Domain
//!
//! Pure types shared by the detection engine, the line-break scanners and the
//! batch engine. Nothing in here touches the filesystem.

#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod detection;
pub mod encoding;
pub mod options;
pub mod report;

pub use config::{BatchConfig, BatchConfigBuilder};
pub use detection::{DetectionResult, EncodingCertainty, UNKNOWN_ENCODING_NAME};
pub use encoding::Encoding;
pub use options::{LineCountMethod, LineCountStrategy};
pub use report::{BatchReport, EncodingStatistics};
