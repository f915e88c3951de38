use enc_lines::{DetectionResult, Encoding, EncodingCertainty, FileEncodingDetector, detect_encoding};

use crate::common::{Fixture, TempWorkspace};

#[test]
fn every_bom_is_recognized_with_its_length() {
    let ws = TempWorkspace::new();
    let cases = [
        (Encoding::Utf8, 3),
        (Encoding::Utf16Le, 2),
        (Encoding::Utf16Be, 2),
        (Encoding::Utf32Le, 4),
        (Encoding::Utf32Be, 4),
        (Encoding::Gb18030, 4),
    ];
    for (encoding, bom_len) in cases {
        let path = ws.write_fixture(&format!("{encoding}.txt"), &Fixture::new("hi\n", encoding).with_bom());
        let result = detect_encoding(&path).unwrap();
        assert_eq!(result, DetectionResult { encoding: Some(encoding), is_certain: true, bom_len }, "{encoding}");
        assert_eq!(result.certainty(path.metadata().unwrap().len()), EncodingCertainty::Certain);
    }
}

#[test]
fn bomless_wide_text_round_trips() {
    let ws = TempWorkspace::new();
    for encoding in [Encoding::Utf16Le, Encoding::Utf16Be, Encoding::Utf32Le, Encoding::Utf32Be] {
        let path = ws.write_fixture(&format!("{encoding}.txt"), &Fixture::new("int main() {}\n", encoding));
        let result = detect_encoding(&path).unwrap();
        assert_eq!(result.encoding, Some(encoding));
        assert!(result.is_certain);
        assert_eq!(result.bom_len, 0);
    }
}

#[test]
fn bom_fixtures_guess_back_to_their_encoding() {
    let ws = TempWorkspace::new();
    let detector = FileEncodingDetector::new();
    for encoding in [Encoding::Utf8, Encoding::Utf16Le, Encoding::Utf16Be, Encoding::Utf32Le, Encoding::Utf32Be] {
        let path = ws.write_fixture(&format!("{encoding}.txt"), &Fixture::new("round\ntrip\n", encoding).with_bom());
        assert_eq!(detector.detect_bom(&path).unwrap(), Some(encoding));
        assert_eq!(detector.guess_ignoring_bom(&path).unwrap(), Some(encoding), "{encoding}");
    }
}

#[test]
fn long_files_are_guessed_from_their_prefix_only() {
    let ws = TempWorkspace::new();
    let mut bytes = b"x".repeat(2000);
    bytes.extend_from_slice(b"\xE9\n");
    let path = ws.write_bytes("late_latin1.txt", &bytes);

    let result = detect_encoding(&path).unwrap();

    assert_eq!(result.encoding, Some(Encoding::Utf8));
    assert_eq!(result.certainty(bytes.len() as u64), EncodingCertainty::Doubtful);
}

#[test]
fn empty_file_is_certain_utf8() {
    let ws = TempWorkspace::new();
    let path = ws.write_bytes("empty.txt", b"");
    assert_eq!(detect_encoding(&path).unwrap(), DetectionResult::empty_file());
}
