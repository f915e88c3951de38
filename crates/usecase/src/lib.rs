//! # Use Cases
//!
//! Application-level orchestration logic.
//!
//! - [`batch`]: the batch engine counting lines over a collection of files
//! - [`report`]: logging of a finished batch
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

mod aggregation;
pub mod batch;
pub mod report;

pub use batch::BatchEngine;
pub use report::log_report;
