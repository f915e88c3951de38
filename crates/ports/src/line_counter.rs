// crates/ports/src/line_counter.rs
use std::path::Path;

use enc_lines_domain::{Encoding, LineCountStrategy};
use enc_lines_shared_kernel::{LineCount, Result};

/// Port implemented by every line counting algorithm, exact or approximate.
pub trait LineCounter: Send + Sync {
    fn strategy(&self) -> LineCountStrategy;

    /// Count the lines of the file at `path`, skipping a BOM of `bom_len` bytes.
    ///
    /// Returns 0 when nothing follows the BOM, otherwise the number of line terminators plus one.
    fn count_lines(&self, path: &Path, encoding: Encoding, bom_len: usize) -> Result<LineCount>;

    fn is_exact(&self) -> bool {
        self.strategy().is_exact()
    }
}

/// Resolves a strategy to the counter implementing it.
pub trait LineCounterRegistry: Send + Sync {
    fn counter(&self, strategy: LineCountStrategy) -> &dyn LineCounter;
}
