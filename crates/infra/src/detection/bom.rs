// crates/infra/src/detection/bom.rs
use enc_lines_domain::Encoding;

/// Number of leading bytes needed to recognize every supported BOM.
pub const BOM_PROBE_LEN: usize = 4;

/// Encoding announced by a byte-order mark at the start of `bytes`, if any.
///
/// The UTF-32 marks must be tested before the UTF-16 ones: `FF FE 00 00` starts with the UTF-16LE
/// mark. Keep the arms in this order.
pub fn encoding_from_bom(bytes: &[u8]) -> Option<Encoding> {
    match bytes {
        [0xEF, 0xBB, 0xBF, ..] => Some(Encoding::Utf8),
        [0x00, 0x00, 0xFE, 0xFF, ..] => Some(Encoding::Utf32Be),
        [0xFF, 0xFE, 0x00, 0x00, ..] => Some(Encoding::Utf32Le),
        [0xFF, 0xFE, ..] => Some(Encoding::Utf16Le),
        [0xFE, 0xFF, ..] => Some(Encoding::Utf16Be),
        [0x84, 0x31, 0x95, 0x33, ..] => Some(Encoding::Gb18030),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_mark_with_trailing_content() {
        let cases: [(&[u8], Encoding); 6] = [
            (&[0xEF, 0xBB, 0xBF, b'a', b'b'], Encoding::Utf8),
            (&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, b'a'], Encoding::Utf32Be),
            (&[0xFF, 0xFE, 0x00, 0x00, b'a', 0x00, 0x00, 0x00], Encoding::Utf32Le),
            (&[0xFF, 0xFE, b'a', 0x00], Encoding::Utf16Le),
            (&[0xFE, 0xFF, 0x00, b'a'], Encoding::Utf16Be),
            (&[0x84, 0x31, 0x95, 0x33, b'a'], Encoding::Gb18030),
        ];
        for (bytes, expected) in cases {
            assert_eq!(encoding_from_bom(bytes), Some(expected), "{bytes:02X?}");
        }
    }

    #[test]
    fn marks_alone_are_enough() {
        assert_eq!(encoding_from_bom(&[0xFF, 0xFE]), Some(Encoding::Utf16Le));
        assert_eq!(encoding_from_bom(&[0xEF, 0xBB, 0xBF]), Some(Encoding::Utf8));
        assert_eq!(encoding_from_bom(&[0xFF, 0xFE, 0x00, 0x00]), Some(Encoding::Utf32Le));
    }

    #[test]
    fn utf16le_mark_followed_by_one_nul_stays_utf16() {
        assert_eq!(encoding_from_bom(&[0xFF, 0xFE, 0x00, b'a']), Some(Encoding::Utf16Le));
    }

    #[test]
    fn partial_marks_are_not_recognized() {
        assert_eq!(encoding_from_bom(&[]), None);
        assert_eq!(encoding_from_bom(&[0xEF, 0xBB]), None);
        assert_eq!(encoding_from_bom(&[0x00, 0x00, 0xFE]), None);
        assert_eq!(encoding_from_bom(&[0x84, 0x31, 0x95]), None);
        assert_eq!(encoding_from_bom(b"plain text"), None);
    }
}
