// crates/usecase/src/aggregation.rs
//! Batch-scoped state shared by reference with every worker.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
};

use enc_lines_domain::{BatchConfig, BatchReport, EncodingCertainty, EncodingStatistics, LineCountMethod};
use enc_lines_shared_kernel::{ByteCount, LineCount};

pub(crate) struct BatchState {
    submitted: usize,
    total_lines: AtomicU64,
    processed_bytes: AtomicU64,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    dispatched: AtomicUsize,
    workers: Option<WorkerSlots>,
    encodings: Option<EncodingCounters>,
}

impl BatchState {
    pub(crate) fn new(submitted: usize, pool_size: usize, config: &BatchConfig) -> Self {
        Self {
            submitted,
            total_lines: AtomicU64::new(0),
            processed_bytes: AtomicU64::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            dispatched: AtomicUsize::new(0),
            workers: config.collect_worker_ids.then(|| WorkerSlots::new(pool_size)),
            encodings: config.collect_encoding_stats.then(EncodingCounters::default),
        }
    }

    pub(crate) fn submitted(&self) -> usize {
        self.submitted
    }

    pub(crate) fn total_lines(&self) -> u64 {
        self.total_lines.load(Ordering::Relaxed)
    }

    pub(crate) fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub(crate) fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::Relaxed)
    }

    /// Next file number, starting at 1 and unique across workers.
    pub(crate) fn dispatch(&self) -> usize {
        self.dispatched.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self, lines: LineCount, bytes: u64) {
        self.total_lines.fetch_add(lines.value(), Ordering::Relaxed);
        self.processed_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the failure count including this one.
    pub(crate) fn record_failure(&self) -> usize {
        self.failed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn record_worker(&self, index: usize) {
        if let Some(workers) = &self.workers {
            workers.mark(index);
        }
    }

    /// Number of distinct workers seen so far, when recorded.
    pub(crate) fn worker_count(&self) -> Option<usize> {
        self.workers.as_ref().map(WorkerSlots::count)
    }

    /// Count one more file for `name` in its bucket; returns the new use count when recorded.
    pub(crate) fn record_encoding(&self, certainty: EncodingCertainty, name: &'static str) -> Option<usize> {
        self.encodings.as_ref().map(|counters| counters.record(certainty, name))
    }

    pub(crate) fn into_report(self, method: LineCountMethod) -> BatchReport {
        BatchReport {
            method,
            total_lines: LineCount::new(self.total_lines.into_inner()),
            processed_bytes: ByteCount::new(self.processed_bytes.into_inner()),
            files_submitted: self.submitted,
            files_succeeded: self.succeeded.into_inner(),
            files_failed: self.failed.into_inner(),
            files_skipped: self.skipped.into_inner(),
            worker_ids: self.workers.map(WorkerSlots::into_set),
            encoding_stats: self.encodings.map(EncodingCounters::into_statistics),
        }
    }
}

/// One flag per pool thread index.
struct WorkerSlots {
    slots: Vec<AtomicBool>,
}

impl WorkerSlots {
    fn new(pool_size: usize) -> Self {
        Self { slots: (0..pool_size).map(|_| AtomicBool::new(false)).collect() }
    }

    fn mark(&self, index: usize) {
        if let Some(slot) = self.slots.get(index) {
            slot.store(true, Ordering::Relaxed);
        }
    }

    fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.load(Ordering::Relaxed)).count()
    }

    fn into_set(self) -> BTreeSet<usize> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.into_inner().then_some(index))
            .collect()
    }
}

type Bucket = RwLock<HashMap<&'static str, AtomicUsize>>;

/// Encoding name to file count, one map per certainty bucket.
#[derive(Default)]
struct EncodingCounters {
    buckets: [Bucket; 3],
}

impl EncodingCounters {
    fn record(&self, certainty: EncodingCertainty, name: &'static str) -> usize {
        let bucket = &self.buckets[certainty.index()];
        {
            let counts = bucket.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(count) = counts.get(name) {
                return count.fetch_add(1, Ordering::Relaxed) + 1;
            }
        }
        // First file with this name in the bucket; another worker may have inserted it meanwhile.
        let mut counts = bucket.write().unwrap_or_else(PoisonError::into_inner);
        counts.entry(name).or_default().fetch_add(1, Ordering::Relaxed) + 1
    }

    fn into_statistics(self) -> EncodingStatistics {
        let mut stats = EncodingStatistics::default();
        for (certainty, bucket) in EncodingCertainty::ALL.into_iter().zip(self.buckets) {
            let counts = bucket.into_inner().unwrap_or_else(PoisonError::into_inner);
            stats
                .bucket_mut(certainty)
                .extend(counts.into_iter().map(|(name, count)| (name.to_string(), count.into_inner())));
        }
        stats
    }
}
