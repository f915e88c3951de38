// crates/ports/src/detection.rs
use std::path::Path;

use enc_lines_domain::DetectionResult;
use enc_lines_shared_kernel::Result;

/// Port for finding or guessing the encoding of a file.
pub trait EncodingDetector: Send + Sync {
    /// Detect the encoding of the file at `path`.
    ///
    /// An undetectable encoding is not an error: it is reported as `encoding: None`.
    fn detect(&self, path: &Path) -> Result<DetectionResult>;
}
