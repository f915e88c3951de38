// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod decoding;
pub mod detection;
pub mod measurement;
pub mod persistence;

pub use decoding::CharDecoder;
pub use detection::{FileEncodingDetector, Sample, encoding_from_bom, guess_from_sample};
pub use measurement::{StrategyRegistry, strategies};
pub use persistence::FileReader;
