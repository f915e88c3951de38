//! # Ports
//!
//! Interface definitions between the batch engine and its adapters.
//!
//! - [`detection`]: encoding detection of a single file
//! - [`line_counter`]: line counting strategies and their lookup
//!
//! These ports let the batch engine stay independent of how files are read and decoded.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod detection;
pub mod line_counter;

pub use detection::EncodingDetector;
pub use line_counter::{LineCounter, LineCounterRegistry};
