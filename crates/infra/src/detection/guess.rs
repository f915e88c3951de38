// crates/infra/src/detection/guess.rs
use enc_lines_domain::Encoding;
use log::debug;

use crate::decoding::CharDecoder;

/// Bytes sampled from the start of a file when no BOM is found.
pub const SAMPLE_LEN: usize = 1024;

/// NUL density separating UTF-16 (50% for ASCII text) from UTF-32 (75% for ASCII text).
const UTF16_VS_UTF32_DENSITY: f64 = (0.50 + 0.75) / 2.0;

/// Guess the encoding of `sample`, the first bytes of a file of `file_len` bytes.
///
/// Trial decoding is final only when the sample is the whole file, so a multi-byte sequence cut
/// by the end of a partial sample does not count against an encoding.
pub fn guess_from_sample(sample: &[u8], file_len: u64) -> Option<Encoding> {
    GuessScratch::with_capacity(sample.len()).guess(sample, file_len)
}

/// Working buffers for one detection call. Owned by the calling worker.
#[derive(Debug, Default)]
pub struct GuessScratch {
    without_nul: Vec<u8>,
    decoded: Vec<u16>,
}

impl GuessScratch {
    pub fn with_capacity(sample_len: usize) -> Self {
        Self { without_nul: Vec::with_capacity(sample_len), decoded: Vec::with_capacity(sample_len * 2) }
    }

    pub fn guess(&mut self, sample: &[u8], file_len: u64) -> Option<Encoding> {
        if sample.is_empty() {
            return None;
        }
        let whole_file = sample.len() as u64 == file_len;
        let nul_count = bytecount::count(sample, 0);

        if let Some(encoding) = self.guess_wide(sample, file_len, nul_count, whole_file) {
            return Some(encoding);
        }

        // Mainframe exports sometimes carry genuine NULs in otherwise single-byte text.
        self.without_nul.clear();
        self.without_nul.extend(sample.iter().map(|&b| if b == 0 { b' ' } else { b }));

        let candidates: &[(Encoding, bool)] = if nul_count > 0 {
            &[(Encoding::Utf8, false), (Encoding::Gb18030, true), (Encoding::Iso8859_1, false)]
        } else {
            &[(Encoding::Utf8, false), (Encoding::Iso8859_1, false)]
        };
        for &(encoding, keep_nul) in candidates {
            let bytes = if keep_nul { sample } else { self.without_nul.as_slice() };
            if trial_decode(encoding, bytes, &mut self.decoded, whole_file) {
                debug!("guessed {encoding} from {} sampled bytes ({nul_count} NUL)", sample.len());
                return Some(encoding);
            }
        }
        None
    }

    /// UTF-32 then UTF-16 trials, each with the endianness suggested by NUL positions first.
    fn guess_wide(
        &mut self,
        sample: &[u8],
        file_len: u64,
        nul_count: usize,
        whole_file: bool,
    ) -> Option<Encoding> {
        if nul_count == 0 {
            return None;
        }
        let density = nul_count as f64 / sample.len() as f64;

        if file_len % 4 == 0 && density >= UTF16_VS_UTF32_DENSITY {
            let mut by_offset = [0usize; 4];
            for (i, _) in sample.iter().enumerate().filter(|(_, b)| **b == 0) {
                by_offset[i & 3] += 1;
            }
            // "A" is 41 00 00 00 in UTF-32LE: zeros pile up at offsets 2 and 3.
            let first = if by_offset[2] + by_offset[3] > by_offset[0] + by_offset[1] {
                Encoding::Utf32Le
            } else {
                Encoding::Utf32Be
            };
            if let Some(encoding) = self.try_both_endians(first, sample, whole_file) {
                return Some(encoding);
            }
        }

        if file_len % 2 == 0 {
            let mut by_offset = [0usize; 2];
            for (i, _) in sample.iter().enumerate().filter(|(_, b)| **b == 0) {
                by_offset[i & 1] += 1;
            }
            let first = if by_offset[1] > by_offset[0] { Encoding::Utf16Le } else { Encoding::Utf16Be };
            if let Some(encoding) = self.try_both_endians(first, sample, whole_file) {
                return Some(encoding);
            }
        }
        None
    }

    fn try_both_endians(&mut self, first: Encoding, sample: &[u8], whole_file: bool) -> Option<Encoding> {
        [first, first.swapped_endianness()].into_iter().find(|&encoding| {
            let ok = trial_decode(encoding, sample, &mut self.decoded, whole_file);
            debug!("trial decode as {encoding}: {}", if ok { "ok" } else { "rejected" });
            ok
        })
    }
}

fn trial_decode(encoding: Encoding, bytes: &[u8], decoded: &mut Vec<u16>, last: bool) -> bool {
    decoded.clear();
    CharDecoder::new(encoding).decode_strict(bytes, decoded, last)
}
