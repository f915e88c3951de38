use enc_lines::{BatchConfig, Encoding, LineCountMethod, count_lines, strategies};
use proptest::prelude::*;

use crate::common::{Fixture, TempWorkspace};

fn mixed_collection(ws: &TempWorkspace) -> Vec<(std::path::PathBuf, u64)> {
    let fixtures = [
        ("plain.txt", Fixture::new("a\nb\nc", Encoding::Utf8)),
        ("bom8.txt", Fixture::new("x\r\ny\r\n", Encoding::Utf8).with_bom()),
        ("le16.txt", Fixture::new("one\ntwo\nthree\n", Encoding::Utf16Le).with_bom()),
        ("be16.txt", Fixture::new("one\rtwo", Encoding::Utf16Be)),
        ("le32.txt", Fixture::new("α\nβ\n", Encoding::Utf32Le)),
        ("be32.txt", Fixture::new("z\r\n", Encoding::Utf32Be).with_bom()),
        ("empty.txt", Fixture::new("", Encoding::Utf8)),
        ("bom_only.txt", Fixture::new("", Encoding::Utf16Le).with_bom()),
    ];
    fixtures
        .iter()
        .map(|(name, fixture)| (ws.write_fixture(name, fixture), fixture.expected_lines()))
        .collect()
}

#[test]
fn exact_total_is_the_sum_of_file_counts() {
    let ws = TempWorkspace::new();
    let files = mixed_collection(&ws);
    let expected: u64 = files.iter().map(|(_, lines)| lines).sum();
    let paths: Vec<_> = files.into_iter().map(|(path, _)| path).collect();

    let report = count_lines(&paths, None, &BatchConfig::default()).unwrap();

    assert_eq!(report.total_lines.value(), expected);
    assert_eq!(report.files_submitted, paths.len());
    assert_eq!(report.files_succeeded, paths.len());
    assert_eq!(report.files_failed, 0);
    assert!(report.is_exact());
}

#[test]
fn statistics_bucket_every_file_once() {
    let ws = TempWorkspace::new();
    let paths: Vec<_> = mixed_collection(&ws).into_iter().map(|(path, _)| path).collect();
    let config = BatchConfig::builder()
        .collect_encoding_stats(true)
        .collect_worker_ids(true)
        .log_per_file(true)
        .progress_frequency(2_usize)
        .jobs(3_usize)
        .build()
        .unwrap();

    let report = count_lines(&paths, None, &config).unwrap();
    let stats = report.encoding_stats.unwrap();

    assert_eq!(stats.total_files(), paths.len());
    // Four BOMs plus the empty file.
    assert_eq!(stats.certain.values().sum::<usize>(), 5);
    assert_eq!(stats.certain.get("UTF-16LE"), Some(&1));
    assert_eq!(stats.guessed.get("UTF-16BE"), Some(&1));
    assert_eq!(stats.guessed.get("UTF-32LE"), Some(&1));
    assert!(report.worker_ids.unwrap().iter().all(|&id| id < 3));
}

#[test]
fn missing_files_are_not_submitted() {
    let ws = TempWorkspace::new();
    let present = ws.write_bytes("here.txt", b"1\n2\n");
    let missing = ws.path().join("gone.txt");

    let report = count_lines(&[present, missing], None, &BatchConfig::default()).unwrap();

    assert_eq!(report.files_submitted, 1);
    assert_eq!(report.total_lines.value(), 3);
}

#[test]
fn approximate_method_is_flagged_and_differs_on_unterminated_files() {
    let ws = TempWorkspace::new();
    let path = ws.write_bytes("abc.txt", b"a\nb\nc");
    let config = BatchConfig { method: LineCountMethod::BufferedReadLine, ..BatchConfig::default() };

    let report = count_lines(&[path], None, &config).unwrap();

    assert!(!report.is_exact());
    assert_eq!(report.total_lines.value(), 4);
}

#[test]
fn threshold_stops_dispatching_new_files() {
    let ws = TempWorkspace::new();
    let big = "line\n".repeat(50);
    let paths: Vec<_> = (0..6).map(|i| ws.write_bytes(&format!("f{i}.txt"), big.as_bytes())).collect();
    let config = BatchConfig { jobs: Some(1), ..BatchConfig::default() };

    let report = count_lines(&paths, Some(60), &config).unwrap();

    // Each file has 51 lines; the second one crosses the threshold.
    assert_eq!(report.total_lines.value(), 102);
    assert_eq!(report.files_succeeded, 2);
    assert_eq!(report.files_skipped, 4);
}

#[test]
fn invalid_configuration_fails_the_call() {
    let config = BatchConfig { jobs: Some(0), ..BatchConfig::default() };
    let err = count_lines::<&str>(&[], None, &config).unwrap_err();
    assert!(err.is_configuration());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn batch_total_matches_independent_counts(
        texts in prop::collection::vec("[a-z \r\n]{0,40}", 1..8),
        jobs in 1usize..4,
    ) {
        let ws = TempWorkspace::new();
        let paths: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| ws.write_bytes(&format!("p{i}.txt"), text.as_bytes()))
            .collect();
        let independent: u64 = paths
            .iter()
            .map(|path| strategies::count_lines_with_byte_lookup(path, 0, 4096).unwrap().value())
            .sum();

        let config = BatchConfig { jobs: Some(jobs), ..BatchConfig::default() };
        let report = count_lines(&paths, None, &config).unwrap();

        prop_assert_eq!(report.total_lines.value(), independent);
        prop_assert_eq!(report.files_succeeded + report.files_failed, paths.len());
    }
}
