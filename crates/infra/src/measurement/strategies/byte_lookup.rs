// crates/infra/src/measurement/strategies/byte_lookup.rs
use std::path::Path;

use enc_lines_shared_kernel::{InfraResult, InfrastructureError, LineCount};

use super::line_breaks::LineBreakTally;
use crate::persistence::FileReader;

/// Count lines by searching CR and LF bytes directly.
///
/// Only correct for encodings where those bytes never occur inside a multi-byte character
/// (UTF-8 and ISO-8859-1). The first `bom_len` bytes are skipped, even when they span several
/// reads.
pub fn count_lines_with_byte_lookup(
    path: &Path,
    bom_len: usize,
    read_buffer_size: usize,
) -> InfraResult<LineCount> {
    let mut file = FileReader::open(path)?;
    if FileReader::file_len(&file, path)? <= bom_len as u64 {
        return Ok(LineCount::zero());
    }

    let mut buf = vec![0u8; read_buffer_size.max(1)];
    let mut to_skip = bom_len;
    let mut tally = LineBreakTally::default();
    loop {
        let read = FileReader::read_chunk(&mut file, &mut buf).map_err(InfrastructureError::file_read(path))?;
        if read == 0 {
            break;
        }
        let skipped = to_skip.min(read);
        to_skip -= skipped;
        tally.feed_bytes(&buf[skipped..read]);
    }
    Ok(tally.line_count())
}
