// crates/usecase/src/batch.rs
use std::path::Path;

use enc_lines_domain::{BatchConfig, BatchReport, DetectionResult, Encoding};
use enc_lines_ports::{EncodingDetector, LineCounterRegistry};
use enc_lines_shared_kernel::{ErrorContext, InfrastructureError, LineCount, Result};
use log::{error, info};
use rayon::prelude::*;

use crate::aggregation::BatchState;

/// Counts lines over a file collection on a fixed worker pool.
///
/// Each call owns its aggregation state, so one engine can serve several batches in turn.
pub struct BatchEngine<'a> {
    detector: &'a dyn EncodingDetector,
    counters: &'a dyn LineCounterRegistry,
    config: &'a BatchConfig,
}

/// What one worker learned about one file.
struct FileOutcome {
    lines: LineCount,
    file_len: u64,
    detection: DetectionResult,
    encoding: Encoding,
    use_count: Option<usize>,
}

impl<'a> BatchEngine<'a> {
    pub fn new(
        detector: &'a dyn EncodingDetector,
        counters: &'a dyn LineCounterRegistry,
        config: &'a BatchConfig,
    ) -> Self {
        Self { detector, counters, config }
    }

    /// Count the lines of every file of `files` that exists when the call starts.
    ///
    /// Once the running total reaches `threshold`, files not yet started are skipped. Files
    /// already in progress still complete, so the total may overshoot the threshold.
    ///
    /// # Errors
    ///
    /// Fails only on an invalid configuration or when the worker pool cannot be built. A file
    /// that cannot be read is counted as a failure in the report instead.
    pub fn count_lines<P>(&self, files: &[P], threshold: Option<u64>) -> Result<BatchReport>
    where
        P: AsRef<Path> + Sync,
    {
        self.config.validate().context("validating batch configuration")?;

        let existing: Vec<&Path> = files.iter().map(AsRef::as_ref).filter(|path| path.exists()).collect();
        let jobs = self.config.jobs.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| InfrastructureError::ThreadPoolCreation { details: e.to_string() })?;

        let state = BatchState::new(existing.len(), jobs, self.config);
        let threshold = threshold.unwrap_or(u64::MAX);
        pool.install(|| {
            existing.par_iter().for_each(|path| self.process(path, &state, threshold));
        });
        Ok(state.into_report(self.config.method))
    }

    /// Same as [`Self::count_lines`], keeping only the line total.
    ///
    /// # Errors
    ///
    /// See [`Self::count_lines`].
    pub fn total_lines<P>(&self, files: &[P], threshold: Option<u64>) -> Result<u64>
    where
        P: AsRef<Path> + Sync,
    {
        Ok(self.count_lines(files, threshold)?.total_lines.value())
    }

    fn process(&self, path: &Path, state: &BatchState, threshold: u64) {
        if state.total_lines() >= threshold {
            state.record_skip();
            return;
        }
        let file_number = state.dispatch();
        let worker = rayon::current_thread_index().unwrap_or_default();
        state.record_worker(worker);
        if self.config.progress_frequency.is_some_and(|every| file_number % every == 0) {
            log_progress(state, file_number);
        }

        match self.count_file(path, state) {
            Ok(outcome) => {
                state.record_success(outcome.lines, outcome.file_len);
                if self.config.log_per_file {
                    log_file(worker, file_number, path, &outcome);
                }
            }
            Err(err) => {
                let failures = state.record_failure();
                error!(
                    "Line counting failed for file \"{}\" (#failures = {}, #success = {}): {err}",
                    path.display(),
                    failures,
                    state.succeeded()
                );
            }
        }
    }

    fn count_file(&self, path: &Path, state: &BatchState) -> Result<FileOutcome> {
        let file_len = std::fs::metadata(path)
            .map(|meta| meta.len())
            .map_err(|source| InfrastructureError::FileMetadata { path: path.to_path_buf(), source })?;
        let detection = self.detector.detect(path)?;
        let use_count = state.record_encoding(detection.certainty(file_len), detection.encoding_name());

        let (encoding, bom_len) = match detection.encoding {
            Some(encoding) => (encoding, detection.bom_len),
            None => (self.config.default_encoding, 0),
        };
        let strategy = self.config.method.strategy_for(encoding);
        let lines = self.counters.counter(strategy).count_lines(path, encoding, bom_len)?;
        Ok(FileOutcome { lines, file_len, detection, encoding, use_count })
    }
}

fn log_progress(state: &BatchState, file_number: usize) {
    let threads = state.worker_count().map(|n| format!(", using {n} threads")).unwrap_or_default();
    info!(
        "Counted {} kLines in {} / {} files so far (#failures = {}){}...",
        state.total_lines() / 1000,
        file_number,
        state.submitted(),
        state.failed(),
        threads
    );
}

fn log_file(worker: usize, file_number: usize, path: &Path, outcome: &FileOutcome) {
    let certainty = outcome.detection.certainty(outcome.file_len);
    let use_count = outcome.use_count.map(|n| format!(" (#use = {n})")).unwrap_or_default();
    let bom = match outcome.detection.bom_len {
        0 => String::new(),
        len => format!(" - BOM length = {len} bytes"),
    };
    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
    info!(
        "worker {worker:02}: counted {} lines in file #{file_number:06} \"{name}\" with encoding {} ({certainty}){use_count}{bom}",
        outcome.lines, outcome.encoding
    );
}
