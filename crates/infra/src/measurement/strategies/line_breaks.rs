// crates/infra/src/measurement/strategies/line_breaks.rs
use enc_lines_shared_kernel::LineCount;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Running count of line terminators over a stream fed chunk by chunk.
///
/// `\r`, `\n` and `\r\n` each end one line. An LF directly preceded by a CR is not counted again,
/// including when the CR closed the previous chunk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreakTally {
    terminators: u64,
    pending_cr: bool,
}

impl LineBreakTally {
    pub fn feed_bytes(&mut self, chunk: &[u8]) {
        let Some(&last) = chunk.last() else { return };
        for pos in memchr::memchr2_iter(CR, LF, chunk) {
            let after_cr = if pos == 0 { self.pending_cr } else { chunk[pos - 1] == CR };
            if chunk[pos] == CR || !after_cr {
                self.terminators += 1;
            }
        }
        self.pending_cr = last == CR;
    }

    pub fn feed_units(&mut self, chunk: &[u16]) {
        const CR16: u16 = CR as u16;
        const LF16: u16 = LF as u16;

        for &unit in chunk {
            match unit {
                CR16 => {
                    self.terminators += 1;
                    self.pending_cr = true;
                }
                LF16 => {
                    if !self.pending_cr {
                        self.terminators += 1;
                    }
                    self.pending_cr = false;
                }
                _ => self.pending_cr = false,
            }
        }
    }

    pub const fn terminators(&self) -> u64 {
        self.terminators
    }

    /// Lines of non-empty content: one more than the terminators seen.
    pub fn line_count(&self) -> LineCount {
        LineCount::new(self.terminators + 1)
    }
}
