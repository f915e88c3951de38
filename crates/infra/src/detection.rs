// crates/infra/src/detection.rs
//! Encoding detection: BOM recognition first, heuristic guessing on a sample otherwise.

mod bom;
mod guess;

use std::path::Path;

use enc_lines_domain::{DetectionResult, Encoding};
use enc_lines_ports::detection::EncodingDetector;
use enc_lines_shared_kernel::{InfraResult, InfrastructureError, Result};
use log::debug;

use crate::persistence::FileReader;

pub use bom::{BOM_PROBE_LEN, encoding_from_bom};
pub use guess::{GuessScratch, SAMPLE_LEN, guess_from_sample};

/// Leading bytes of a file together with its length on disk.
pub struct Sample {
    bytes: [u8; SAMPLE_LEN],
    len: usize,
    file_len: u64,
}

impl Sample {
    /// Read at most [`SAMPLE_LEN`] bytes from the start of `path`.
    pub fn read(path: &Path) -> InfraResult<Self> {
        let mut file = FileReader::open(path)?;
        let file_len = FileReader::file_len(&file, path)?;
        let mut bytes = [0u8; SAMPLE_LEN];
        let len = FileReader::read_up_to(&mut file, &mut bytes).map_err(InfrastructureError::file_read(path))?;
        Ok(Self { bytes, len, file_len })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn is_whole_file(&self) -> bool {
        self.len as u64 == self.file_len
    }
}

/// Filesystem-backed [`EncodingDetector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FileEncodingDetector;

impl FileEncodingDetector {
    pub const fn new() -> Self {
        Self
    }

    /// Classify an already read sample.
    pub fn classify(sample: &Sample) -> DetectionResult {
        let bytes = sample.bytes();
        if bytes.is_empty() {
            return DetectionResult::empty_file();
        }
        if let Some(encoding) = encoding_from_bom(bytes) {
            return DetectionResult::from_bom(encoding);
        }
        let guessed = GuessScratch::with_capacity(bytes.len()).guess(bytes, sample.file_len());
        let is_certain = guessed.is_some_and(|e| e != Encoding::Iso8859_1) && sample.is_whole_file();
        DetectionResult::guessed(guessed, is_certain)
    }

    /// Encoding announced by the BOM of `path`, ignoring everything else.
    pub fn detect_bom(&self, path: &Path) -> Result<Option<Encoding>> {
        let mut file = FileReader::open(path)?;
        let mut probe = [0u8; BOM_PROBE_LEN];
        let len = FileReader::read_up_to(&mut file, &mut probe).map_err(InfrastructureError::file_read(path))?;
        Ok(encoding_from_bom(&probe[..len]))
    }

    /// Guess from the sample with any recognized BOM removed first.
    pub fn guess_ignoring_bom(&self, path: &Path) -> Result<Option<Encoding>> {
        let sample = Sample::read(path)?;
        let skip = encoding_from_bom(sample.bytes()).map_or(0, Encoding::bom_len);
        Ok(guess_from_sample(&sample.bytes()[skip..], sample.file_len()))
    }
}

impl EncodingDetector for FileEncodingDetector {
    fn detect(&self, path: &Path) -> Result<DetectionResult> {
        let sample = Sample::read(path)?;
        let result = Self::classify(&sample);
        debug!(
            "{}: {} (certain = {}, BOM = {} bytes)",
            path.display(),
            result.encoding_name(),
            result.is_certain,
            result.bom_len
        );
        Ok(result)
    }
}
