// crates/infra/src/decoding.rs
//! Streaming decoders turning file bytes into UTF-16 code units.
//!
//! `encoding_rs` covers UTF-8, UTF-16 and GB18030. It has no UTF-32, which is decoded by
//! [`utf32::Utf32Decoder`], and ISO-8859-1 maps every byte to the code point of the same value.
//! CR and LF only ever need to be compared against single code units, so UTF-16 output is enough
//! for both trial decoding and line-break scanning.

mod utf32;

use encoding_rs::{CoderResult, Decoder, DecoderResult, GB18030, UTF_8, UTF_16BE, UTF_16LE};
use enc_lines_domain::Encoding;

pub use utf32::Utf32Decoder;

/// Stateful decoder for one [`Encoding`], fed chunk by chunk.
///
/// A BOM is never stripped: it comes out as U+FEFF like any other character.
pub struct CharDecoder {
    inner: Inner,
}

enum Inner {
    Whatwg(Decoder),
    Utf32(Utf32Decoder),
    Latin1,
}

impl CharDecoder {
    pub fn new(encoding: Encoding) -> Self {
        let inner = match encoding {
            Encoding::Utf8 => Inner::Whatwg(UTF_8.new_decoder_without_bom_handling()),
            Encoding::Utf16Le => Inner::Whatwg(UTF_16LE.new_decoder_without_bom_handling()),
            Encoding::Utf16Be => Inner::Whatwg(UTF_16BE.new_decoder_without_bom_handling()),
            Encoding::Gb18030 => Inner::Whatwg(GB18030.new_decoder_without_bom_handling()),
            Encoding::Utf32Le => Inner::Utf32(Utf32Decoder::new(false)),
            Encoding::Utf32Be => Inner::Utf32(Utf32Decoder::new(true)),
            Encoding::Iso8859_1 => Inner::Latin1,
        };
        Self { inner }
    }

    /// Decode `src`, appending to `dst`, and report whether every sequence was well formed.
    ///
    /// With `last == false` an incomplete sequence at the end of `src` is kept for the next call
    /// instead of being reported. Decoding stops at the first malformed sequence.
    pub fn decode_strict(&mut self, src: &[u8], dst: &mut Vec<u16>, last: bool) -> bool {
        match &mut self.inner {
            Inner::Whatwg(decoder) => whatwg_strict(decoder, src, dst, last),
            Inner::Utf32(decoder) => decoder.decode(src, dst, last, true),
            Inner::Latin1 => {
                latin1(src, dst);
                true
            }
        }
    }

    /// Decode `src`, appending to `dst`, replacing malformed sequences with U+FFFD.
    pub fn decode_lossy(&mut self, src: &[u8], dst: &mut Vec<u16>, last: bool) {
        match &mut self.inner {
            Inner::Whatwg(decoder) => whatwg_lossy(decoder, src, dst, last),
            Inner::Utf32(decoder) => {
                decoder.decode(src, dst, last, false);
            }
            Inner::Latin1 => latin1(src, dst),
        }
    }
}

fn latin1(src: &[u8], dst: &mut Vec<u16>) {
    dst.extend(src.iter().map(|&b| u16::from(b)));
}

/// Grow `dst` by enough room for `decoder` to decode `src_len` bytes, returning the old length.
fn reserve_tail(decoder: &Decoder, src_len: usize, dst: &mut Vec<u16>) -> usize {
    let start = dst.len();
    let room = decoder.max_utf16_buffer_length(src_len).unwrap_or(src_len + 4).max(4);
    dst.resize(start + room, 0);
    start
}

fn whatwg_strict(decoder: &mut Decoder, mut src: &[u8], dst: &mut Vec<u16>, last: bool) -> bool {
    loop {
        let start = reserve_tail(decoder, src.len(), dst);
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(src, &mut dst[start..], last);
        dst.truncate(start + written);
        match result {
            DecoderResult::InputEmpty => return true,
            DecoderResult::Malformed(..) => return false,
            DecoderResult::OutputFull => src = &src[read..],
        }
    }
}

fn whatwg_lossy(decoder: &mut Decoder, mut src: &[u8], dst: &mut Vec<u16>, last: bool) {
    loop {
        let start = reserve_tail(decoder, src.len(), dst);
        let (result, read, written, _) = decoder.decode_to_utf16(src, &mut dst[start..], last);
        dst.truncate(start + written);
        match result {
            CoderResult::InputEmpty => return,
            CoderResult::OutputFull => src = &src[read..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn strict_utf8_accepts_valid_and_rejects_malformed() {
        let mut out = Vec::new();
        assert!(CharDecoder::new(Encoding::Utf8).decode_strict("héllo".as_bytes(), &mut out, true));
        assert_eq!(out, utf16("héllo"));

        out.clear();
        assert!(!CharDecoder::new(Encoding::Utf8).decode_strict(b"ab\xFFcd", &mut out, true));
    }

    #[test]
    fn strict_non_final_tolerates_cut_sequence() {
        let bytes = "é".as_bytes();
        let mut out = Vec::new();
        assert!(CharDecoder::new(Encoding::Utf8).decode_strict(&bytes[..1], &mut out, false));
        out.clear();
        assert!(!CharDecoder::new(Encoding::Utf8).decode_strict(&bytes[..1], &mut out, true));
    }

    #[test]
    fn lossy_replaces_instead_of_failing() {
        let mut out = Vec::new();
        CharDecoder::new(Encoding::Utf8).decode_lossy(b"a\xFF\n", &mut out, true);
        assert_eq!(out, vec![u16::from(b'a'), 0xFFFD, u16::from(b'\n')]);
    }

    #[test]
    fn utf16_endianness_is_respected() {
        let mut out = Vec::new();
        assert!(CharDecoder::new(Encoding::Utf16Be).decode_strict(&[0x00, b'A', 0x00, b'\n'], &mut out, true));
        assert_eq!(out, utf16("A\n"));
    }

    #[test]
    fn utf16_odd_tail_is_malformed_only_when_final() {
        let mut out = Vec::new();
        assert!(CharDecoder::new(Encoding::Utf16Le).decode_strict(&[b'A', 0x00, b'B'], &mut out, false));
        out.clear();
        assert!(!CharDecoder::new(Encoding::Utf16Le).decode_strict(&[b'A', 0x00, b'B'], &mut out, true));
    }

    #[test]
    fn bom_is_kept_as_a_character() {
        let mut out = Vec::new();
        CharDecoder::new(Encoding::Utf8).decode_lossy(&[0xEF, 0xBB, 0xBF, b'x'], &mut out, true);
        assert_eq!(out, vec![0xFEFF, u16::from(b'x')]);
    }

    #[test]
    fn gb18030_decodes_its_bom_to_one_unit() {
        let mut out = Vec::new();
        CharDecoder::new(Encoding::Gb18030).decode_lossy(&[0x84, 0x31, 0x95, 0x33, b'\r'], &mut out, true);
        assert_eq!(out, vec![0xFEFF, u16::from(b'\r')]);
    }

    #[test]
    fn latin1_never_fails() {
        let all: Vec<u8> = (0..=255).collect();
        let mut out = Vec::new();
        assert!(CharDecoder::new(Encoding::Iso8859_1).decode_strict(&all, &mut out, true));
        assert_eq!(out.len(), 256);
        assert_eq!(out[0xE9], 0x00E9);
    }

    #[test]
    fn decoder_state_spans_chunks() {
        let bytes = "日本".as_bytes();
        let mut decoder = CharDecoder::new(Encoding::Utf8);
        let mut out = Vec::new();
        for byte in bytes {
            assert!(decoder.decode_strict(std::slice::from_ref(byte), &mut out, false));
        }
        assert!(decoder.decode_strict(&[], &mut out, true));
        assert_eq!(out, utf16("日本"));
    }
}
