// crates/usecase/src/report.rs
use enc_lines_domain::{BatchReport, EncodingStatistics};
use log::{info, warn};

/// Log the summary of a finished batch at info level.
///
/// Failures additionally raise a warning so they stand out under a terse log filter.
pub fn log_report(report: &BatchReport) {
    for line in summary_lines(report) {
        info!("{line}");
    }
    if report.files_failed != 0 {
        warn!("Line counting failed for {} file(s)", report.files_failed);
    }
}

fn summary_lines(report: &BatchReport) -> Vec<String> {
    let exactness = if report.is_exact() { "exact" } else { "approx." };
    let threads = report
        .worker_ids
        .as_ref()
        .map(|ids| format!(" (using {} threads)", ids.len()))
        .unwrap_or_default();
    let failure_marker = if report.files_failed != 0 { " *** WARNING ***" } else { "" };

    let mut lines = vec![
        format!(
            "Number of lines in the entire File collection  = {} kLines over {} files ({exactness} count = {})",
            report.total_lines.kilo_lines(),
            report.files_succeeded,
            report.total_lines
        ),
        format!("Number of files whose lines have been counted  = {}{threads}", report.files_succeeded),
        format!("Number of files whose line counting failed     = {}{failure_marker}", report.files_failed),
        format!("Number of bytes processed during line counting = {}", report.processed_bytes),
    ];
    if report.files_skipped != 0 {
        lines.push(format!("Number of files skipped past the line threshold = {}", report.files_skipped));
    }
    if let Some(stats) = &report.encoding_stats {
        lines.extend([
            format!("Number of files per encoding provided by BOM   = {}", EncodingStatistics::describe(&stats.certain)),
            format!("Number of files per encoding that was guessed  = {}", EncodingStatistics::describe(&stats.guessed)),
            format!("Number of files per encoding that is doubtful  = {}", EncodingStatistics::describe(&stats.doubtful)),
            format!("Number of files per encoding (sum of above)    = {}", EncodingStatistics::describe(&stats.combined())),
        ]);
    }
    lines
}
