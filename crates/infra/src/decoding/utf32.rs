// crates/infra/src/decoding/utf32.rs

const REPLACEMENT: u16 = 0xFFFD;

/// UTF-32 decoder producing UTF-16 code units.
///
/// Code points above U+10FFFF and surrogate code points are malformed.
pub struct Utf32Decoder {
    big_endian: bool,
    pending: [u8; 4],
    pending_len: usize,
}

impl Utf32Decoder {
    pub const fn new(big_endian: bool) -> Self {
        Self { big_endian, pending: [0; 4], pending_len: 0 }
    }

    /// Decode `src` into `dst`; returns `false` on the first malformed unit when `strict`.
    ///
    /// Without `strict`, malformed units become U+FFFD and the result is always `true`.
    pub fn decode(&mut self, mut src: &[u8], dst: &mut Vec<u16>, last: bool, strict: bool) -> bool {
        if self.pending_len != 0 {
            let take = (4 - self.pending_len).min(src.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&src[..take]);
            self.pending_len += take;
            src = &src[take..];
            if self.pending_len == 4 {
                self.pending_len = 0;
                if !self.push(self.pending, dst, strict) {
                    return false;
                }
            }
        }

        let mut units = src.chunks_exact(4);
        for unit in &mut units {
            if !self.push([unit[0], unit[1], unit[2], unit[3]], dst, strict) {
                return false;
            }
        }
        let rest = units.remainder();
        if !rest.is_empty() {
            self.pending[..rest.len()].copy_from_slice(rest);
            self.pending_len = rest.len();
        }

        if last && self.pending_len != 0 {
            self.pending_len = 0;
            if strict {
                return false;
            }
            dst.push(REPLACEMENT);
        }
        true
    }

    fn push(&self, unit: [u8; 4], dst: &mut Vec<u16>, strict: bool) -> bool {
        let value = if self.big_endian { u32::from_be_bytes(unit) } else { u32::from_le_bytes(unit) };
        match char::from_u32(value) {
            Some(c) => {
                let mut buf = [0u16; 2];
                dst.extend_from_slice(c.encode_utf16(&mut buf));
                true
            }
            None if strict => false,
            None => {
                dst.push(REPLACEMENT);
                true
            }
        }
    }
}
