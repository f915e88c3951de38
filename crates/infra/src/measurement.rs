// crates/infra/src/measurement.rs
//! [`LineCounter`] adapters over the scanning strategies, and the registry resolving them.

pub mod strategies;

use std::path::Path;

use enc_lines_domain::{Encoding, LineCountStrategy};
use enc_lines_ports::line_counter::{LineCounter, LineCounterRegistry};
use enc_lines_shared_kernel::{LineCount, Result};

use self::strategies::{
    ReaderFlavor, count_lines_with_byte_lookup, count_lines_with_char_lookup, count_lines_with_reader,
};

/// Exact byte scanner for UTF-8 and ISO-8859-1.
#[derive(Debug, Clone, Copy)]
pub struct ByteLookupCounter {
    read_buffer_size: usize,
}

impl ByteLookupCounter {
    pub const fn new(read_buffer_size: usize) -> Self {
        Self { read_buffer_size }
    }
}

impl LineCounter for ByteLookupCounter {
    fn strategy(&self) -> LineCountStrategy {
        LineCountStrategy::ByteLookup
    }

    fn count_lines(&self, path: &Path, _encoding: Encoding, bom_len: usize) -> Result<LineCount> {
        Ok(count_lines_with_byte_lookup(path, bom_len, self.read_buffer_size)?)
    }
}

/// Exact scanner over decoded characters.
#[derive(Debug, Clone, Copy)]
pub struct CharLookupCounter {
    read_buffer_size: usize,
}

impl CharLookupCounter {
    pub const fn new(read_buffer_size: usize) -> Self {
        Self { read_buffer_size }
    }
}

impl LineCounter for CharLookupCounter {
    fn strategy(&self) -> LineCountStrategy {
        LineCountStrategy::CharLookup
    }

    fn count_lines(&self, path: &Path, encoding: Encoding, bom_len: usize) -> Result<LineCount> {
        Ok(count_lines_with_char_lookup(path, encoding, bom_len, self.read_buffer_size)?)
    }
}

/// Approximate line-reader counter.
#[derive(Debug, Clone, Copy)]
pub struct LineReaderCounter {
    flavor: ReaderFlavor,
}

impl LineReaderCounter {
    pub const fn new(flavor: ReaderFlavor) -> Self {
        Self { flavor }
    }
}

impl LineCounter for LineReaderCounter {
    fn strategy(&self) -> LineCountStrategy {
        self.flavor.strategy()
    }

    fn count_lines(&self, path: &Path, encoding: Encoding, bom_len: usize) -> Result<LineCount> {
        Ok(count_lines_with_reader(path, encoding, bom_len, self.flavor)?)
    }
}

/// Every strategy, ready to be shared by all workers of a batch.
#[derive(Debug, Clone, Copy)]
pub struct StrategyRegistry {
    byte_lookup: ByteLookupCounter,
    char_lookup: CharLookupCounter,
    buffered_read_line: LineReaderCounter,
    custom_read_line: LineReaderCounter,
    custom_has_next_line: LineReaderCounter,
}

impl StrategyRegistry {
    /// `read_buffer_size` applies to the exact scanners; the line readers use fixed buffers.
    pub const fn new(read_buffer_size: usize) -> Self {
        Self {
            byte_lookup: ByteLookupCounter::new(read_buffer_size),
            char_lookup: CharLookupCounter::new(read_buffer_size),
            buffered_read_line: LineReaderCounter::new(ReaderFlavor::BufferedReadLine),
            custom_read_line: LineReaderCounter::new(ReaderFlavor::CustomReadLine),
            custom_has_next_line: LineReaderCounter::new(ReaderFlavor::CustomHasNextLine),
        }
    }
}

impl LineCounterRegistry for StrategyRegistry {
    fn counter(&self, strategy: LineCountStrategy) -> &dyn LineCounter {
        match strategy {
            LineCountStrategy::ByteLookup => &self.byte_lookup,
            LineCountStrategy::CharLookup => &self.char_lookup,
            LineCountStrategy::BufferedReadLine => &self.buffered_read_line,
            LineCountStrategy::CustomReadLine => &self.custom_read_line,
            LineCountStrategy::CustomHasNextLine => &self.custom_has_next_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_strategy_to_itself() {
        let registry = StrategyRegistry::new(64);
        for strategy in LineCountStrategy::ALL {
            let counter = registry.counter(strategy);
            assert_eq!(counter.strategy(), strategy);
            assert_eq!(counter.is_exact(), strategy.is_exact());
        }
    }
}
