// crates/domain/src/report.rs
use std::collections::{BTreeMap, BTreeSet};

use enc_lines_shared_kernel::{ByteCount, LineCount};
use serde::{Deserialize, Serialize};

use crate::{detection::EncodingCertainty, options::LineCountMethod};

/// Immutable snapshot handed back to the caller once a batch completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub method: LineCountMethod,
    pub total_lines: LineCount,
    pub processed_bytes: ByteCount,
    /// Files that existed on disk when the batch started.
    pub files_submitted: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    /// Files left untouched because the line threshold had been reached.
    pub files_skipped: usize,
    pub worker_ids: Option<BTreeSet<usize>>,
    pub encoding_stats: Option<EncodingStatistics>,
}

impl BatchReport {
    pub fn is_exact(&self) -> bool {
        self.method.is_exact()
    }

    pub fn files_processed(&self) -> usize {
        self.files_succeeded + self.files_failed
    }
}

/// File counts per encoding name, split into the three certainty buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingStatistics {
    pub certain: BTreeMap<String, usize>,
    pub guessed: BTreeMap<String, usize>,
    pub doubtful: BTreeMap<String, usize>,
}

impl EncodingStatistics {
    pub fn bucket(&self, certainty: EncodingCertainty) -> &BTreeMap<String, usize> {
        match certainty {
            EncodingCertainty::Certain => &self.certain,
            EncodingCertainty::Guessed => &self.guessed,
            EncodingCertainty::Doubtful => &self.doubtful,
        }
    }

    pub fn bucket_mut(&mut self, certainty: EncodingCertainty) -> &mut BTreeMap<String, usize> {
        match certainty {
            EncodingCertainty::Certain => &mut self.certain,
            EncodingCertainty::Guessed => &mut self.guessed,
            EncodingCertainty::Doubtful => &mut self.doubtful,
        }
    }

    /// Per-encoding sum over the three buckets.
    pub fn combined(&self) -> BTreeMap<String, usize> {
        let mut combined = BTreeMap::new();
        for certainty in EncodingCertainty::ALL {
            for (name, count) in self.bucket(certainty) {
                *combined.entry(name.clone()).or_insert(0) += count;
            }
        }
        combined
    }

    pub fn total_files(&self) -> usize {
        EncodingCertainty::ALL.iter().flat_map(|c| self.bucket(*c).values()).sum()
    }

    /// `"name=count, name=count"` sorted by name.
    pub fn describe(counts: &BTreeMap<String, usize>) -> String {
        counts.iter().map(|(name, count)| format!("{name}={count}")).collect::<Vec<_>>().join(", ")
    }
}
