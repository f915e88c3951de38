// crates/infra/src/measurement/strategies/line_reader.rs
//! Approximate counting through a buffered line reader.
//!
//! The reader mirrors a classic `readLine` loop over an 8192-unit character buffer. Its counts
//! depend on where a trailing terminator falls relative to buffer refills, which is exactly why it
//! is only used to compare throughput against the exact scanners.

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use enc_lines_domain::{Encoding, LineCountStrategy};
use enc_lines_shared_kernel::{InfraResult, InfrastructureError, LineCount};

use crate::{decoding::CharDecoder, persistence::FileReader};

const CHAR_BUFFER_LEN: usize = 8192;
const BYTE_BUFFER_LEN: usize = 8192;
const CR: u16 = b'\r' as u16;
const LF: u16 = b'\n' as u16;

/// Which end-of-input behaviour the reader reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderFlavor {
    /// A line still pending at end of input is returned only if it is non-empty.
    BufferedReadLine,
    /// A line still pending at end of input is returned even when empty.
    CustomReadLine,
    /// Probe for a next line without building it.
    CustomHasNextLine,
}

impl ReaderFlavor {
    pub const fn from_strategy(strategy: LineCountStrategy) -> Option<Self> {
        match strategy {
            LineCountStrategy::BufferedReadLine => Some(Self::BufferedReadLine),
            LineCountStrategy::CustomReadLine => Some(Self::CustomReadLine),
            LineCountStrategy::CustomHasNextLine => Some(Self::CustomHasNextLine),
            LineCountStrategy::ByteLookup | LineCountStrategy::CharLookup => None,
        }
    }

    pub const fn strategy(self) -> LineCountStrategy {
        match self {
            Self::BufferedReadLine => LineCountStrategy::BufferedReadLine,
            Self::CustomReadLine => LineCountStrategy::CustomReadLine,
            Self::CustomHasNextLine => LineCountStrategy::CustomHasNextLine,
        }
    }
}

/// Approximate line count. Starts from 1 and adds one per line the reader yields.
pub fn count_lines_with_reader(
    path: &Path,
    encoding: Encoding,
    bom_len: usize,
    flavor: ReaderFlavor,
) -> InfraResult<LineCount> {
    let file = FileReader::open(path)?;
    if FileReader::file_len(&file, path)? <= bom_len as u64 {
        return Ok(LineCount::zero());
    }

    let mut reader = LineReader::new(DecodedSource::new(file, encoding));
    let mut count = 1u64;
    let next = |reader: &mut LineReader<File>| match flavor {
        ReaderFlavor::BufferedReadLine => reader.read_line(false),
        ReaderFlavor::CustomReadLine => reader.read_line(true),
        ReaderFlavor::CustomHasNextLine => reader.has_next_line(),
    };
    while next(&mut reader).map_err(InfrastructureError::file_read(path))? {
        count += 1;
    }
    Ok(LineCount::new(count))
}

/// Byte stream decoded on demand into UTF-16 units.
struct DecodedSource<R> {
    inner: R,
    decoder: CharDecoder,
    bytes: Box<[u8]>,
    decoded: Vec<u16>,
    pos: usize,
    eof: bool,
}

impl<R: Read> DecodedSource<R> {
    fn new(inner: R, encoding: Encoding) -> Self {
        Self {
            inner,
            decoder: CharDecoder::new(encoding),
            bytes: vec![0; BYTE_BUFFER_LEN].into_boxed_slice(),
            decoded: Vec::with_capacity(BYTE_BUFFER_LEN + 4),
            pos: 0,
            eof: false,
        }
    }

    /// Copy decoded units into `out`; 0 means end of input.
    fn read_units(&mut self, out: &mut [u16]) -> io::Result<usize> {
        loop {
            if self.pos < self.decoded.len() {
                let n = out.len().min(self.decoded.len() - self.pos);
                out[..n].copy_from_slice(&self.decoded[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            if self.eof {
                return Ok(0);
            }
            self.decoded.clear();
            self.pos = 0;
            let read = FileReader::read_chunk(&mut self.inner, &mut self.bytes)?;
            self.eof = read == 0;
            self.decoder.decode_lossy(&self.bytes[..read], &mut self.decoded, self.eof);
        }
    }
}

struct LineReader<R> {
    source: DecodedSource<R>,
    buf: Box<[u16]>,
    next: usize,
    len: usize,
    skip_lf: bool,
}

impl<R: Read> LineReader<R> {
    fn new(source: DecodedSource<R>) -> Self {
        Self { source, buf: vec![0; CHAR_BUFFER_LEN].into_boxed_slice(), next: 0, len: 0, skip_lf: false }
    }

    fn fill_if_drained(&mut self) -> io::Result<bool> {
        if self.next >= self.len {
            self.len = self.source.read_units(&mut self.buf)?;
            self.next = 0;
        }
        Ok(self.next < self.len)
    }

    /// Drop an LF left over from a CR that ended the previous line.
    fn skip_leftover_lf(&mut self, omit_lf: bool) {
        if omit_lf && self.buf[self.next] == LF {
            self.next += 1;
        }
        self.skip_lf = false;
    }

    /// Consume up to and including the next terminator. Returns whether one was found.
    fn consume_through_terminator(&mut self) -> bool {
        let window = &self.buf[self.next..self.len];
        match window.iter().position(|&c| c == LF || c == CR) {
            Some(offset) => {
                let at = self.next + offset;
                self.skip_lf = self.buf[at] == CR;
                self.next = at + 1;
                true
            }
            None => {
                self.next = self.len;
                false
            }
        }
    }

    /// Whether a line was read. `keep_empty_tail` returns an empty pending line at end of input.
    fn read_line(&mut self, keep_empty_tail: bool) -> io::Result<bool> {
        let mut omit_lf = self.skip_lf;
        let mut pending: Option<usize> = None;
        loop {
            if !self.fill_if_drained()? {
                return Ok(pending.is_some_and(|len| keep_empty_tail || len > 0));
            }
            self.skip_leftover_lf(omit_lf);
            omit_lf = false;
            let start = self.next;
            if self.consume_through_terminator() {
                return Ok(true);
            }
            *pending.get_or_insert(0) += self.next - start;
        }
    }

    fn has_next_line(&mut self) -> io::Result<bool> {
        let mut omit_lf = self.skip_lf;
        let mut found_content = false;
        loop {
            if !self.fill_if_drained()? {
                return Ok(found_content);
            }
            self.skip_leftover_lf(omit_lf);
            omit_lf = false;
            if self.consume_through_terminator() {
                return Ok(true);
            }
            found_content = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const FLAVORS: [ReaderFlavor; 3] =
        [ReaderFlavor::BufferedReadLine, ReaderFlavor::CustomReadLine, ReaderFlavor::CustomHasNextLine];

    fn file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn counts(bytes: &[u8], encoding: Encoding, bom_len: usize) -> [u64; 3] {
        let file = file_with(bytes);
        FLAVORS.map(|flavor| count_lines_with_reader(file.path(), encoding, bom_len, flavor).unwrap().value())
    }

    #[test]
    fn unterminated_last_line_overshoots_the_exact_count() {
        assert_eq!(counts(b"a\nb\nc", Encoding::Utf8, 0), [4, 4, 4]);
    }

    #[test]
    fn terminated_last_line_matches_the_exact_count() {
        assert_eq!(counts(b"a\nb\nc\n", Encoding::Utf8, 0), [4, 4, 4]);
    }

    #[test]
    fn crlf_split_by_a_refill_separates_the_flavors() {
        let mut bytes = vec![b'x'; CHAR_BUFFER_LEN - 1];
        bytes.extend_from_slice(b"\r\n");
        assert_eq!(counts(&bytes, Encoding::Utf8, 0), [2, 3, 3]);
    }

    #[test]
    fn empty_and_bom_only_files_have_no_lines() {
        assert_eq!(counts(b"", Encoding::Utf8, 0), [0, 0, 0]);
        assert_eq!(counts(&[0xFF, 0xFE], Encoding::Utf16Le, 2), [0, 0, 0]);
    }

    #[test]
    fn decodes_wide_encodings() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("a\r\nb\n".encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(counts(&bytes, Encoding::Utf16Le, 2), [3, 3, 3]);
    }

    #[test]
    fn flavors_map_back_to_their_strategy() {
        for flavor in FLAVORS {
            assert_eq!(ReaderFlavor::from_strategy(flavor.strategy()), Some(flavor));
        }
        assert_eq!(ReaderFlavor::from_strategy(LineCountStrategy::ByteLookup), None);
    }
}
