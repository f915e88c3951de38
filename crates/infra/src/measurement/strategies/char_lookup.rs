// crates/infra/src/measurement/strategies/char_lookup.rs
use std::path::Path;

use enc_lines_domain::Encoding;
use enc_lines_shared_kernel::{InfraResult, InfrastructureError, LineCount};

use super::line_breaks::LineBreakTally;
use crate::{decoding::CharDecoder, persistence::FileReader};

/// Count lines on decoded characters. Works for every supported encoding.
///
/// Malformed input is replaced, never rejected. A BOM decodes to a single U+FEFF, so when
/// `bom_len` is non-zero exactly one decoded unit is dropped.
pub fn count_lines_with_char_lookup(
    path: &Path,
    encoding: Encoding,
    bom_len: usize,
    read_buffer_size: usize,
) -> InfraResult<LineCount> {
    let mut file = FileReader::open(path)?;
    if FileReader::file_len(&file, path)? <= bom_len as u64 {
        return Ok(LineCount::zero());
    }

    let mut decoder = CharDecoder::new(encoding);
    let mut buf = vec![0u8; read_buffer_size.max(1)];
    let mut units = Vec::with_capacity(buf.len() + 4);
    let mut skip_bom = bom_len != 0;
    let mut tally = LineBreakTally::default();
    loop {
        let read = FileReader::read_chunk(&mut file, &mut buf).map_err(InfrastructureError::file_read(path))?;
        let last = read == 0;
        units.clear();
        decoder.decode_lossy(&buf[..read], &mut units, last);

        let mut decoded = units.as_slice();
        if skip_bom && !decoded.is_empty() {
            decoded = &decoded[1..];
            skip_bom = false;
        }
        tally.feed_units(decoded);
        if last {
            break;
        }
    }
    Ok(tally.line_count())
}

/// Read the whole file, decode it in one pass and count. Exact, but memory grows with the file.
pub fn count_lines_in_memory(path: &Path, encoding: Encoding, bom_len: usize) -> InfraResult<LineCount> {
    let bytes = FileReader::read_to_end(path)?;
    if bytes.len() <= bom_len {
        return Ok(LineCount::zero());
    }
    let mut units = Vec::with_capacity(bytes.len());
    CharDecoder::new(encoding).decode_lossy(&bytes[bom_len..], &mut units, true);
    let mut tally = LineBreakTally::default();
    tally.feed_units(&units);
    Ok(tally.line_count())
}
