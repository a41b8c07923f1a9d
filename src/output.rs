//! Console and JSON reporting of batch validation results.

use serde::Serialize;
use std::time::Duration;

use crate::cli::VerbosityLevel;
use crate::tally::{ViolationCount, ViolationTally};
use crate::validator::{FileValidationResult, ValidationResults, ValidationStatus};

/// Human-readable output formatter for validation runs
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    #[cfg(test)]
    fn plain(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn format_results(&self, results: &ValidationResults, tally: &ViolationTally) -> String {
        let mut output = String::new();

        match self.verbosity {
            VerbosityLevel::Quiet => {
                if results.has_failures() {
                    output.push_str(&format!(
                        "Timed out: {} Failed: {}\n",
                        results.timed_out_files, results.failed_files
                    ));
                }
            }
            VerbosityLevel::Normal | VerbosityLevel::Verbose => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    for file_result in &results.file_results {
                        output.push_str(&self.format_file_result(file_result));
                        output.push('\n');
                    }
                } else {
                    for file_result in &results.file_results {
                        if !file_result.status.is_validated() {
                            output.push_str(&self.format_file_result(file_result));
                            output.push('\n');
                        }
                    }
                }

                output.push_str(&self.format_summary(results));
                if !tally.is_empty() {
                    output.push('\n');
                    output.push_str(&self.format_tally(tally));
                }
            }
        }

        output
    }

    pub fn format_file_result(&self, result: &FileValidationResult) -> String {
        let path_display = result.path.display();
        let duration_str = format_duration(result.duration);

        match &result.status {
            ValidationStatus::Validated => {
                let detail = result
                    .report
                    .as_ref()
                    .map(|report| {
                        if report.compliant {
                            "compliant".to_string()
                        } else {
                            format!("{} violation(s)", report.violations.len())
                        }
                    })
                    .unwrap_or_default();
                format!(
                    "{}  {} ({}) - {}",
                    self.colorize("✓ VALIDATED", "32"),
                    path_display,
                    duration_str,
                    detail
                )
            }
            ValidationStatus::TimedOut => {
                format!(
                    "{}  {} ({})",
                    self.colorize("⏱ TIMED OUT", "33"),
                    path_display,
                    duration_str
                )
            }
            ValidationStatus::Failed { message } => {
                format!(
                    "{}  {} ({}) - {}",
                    self.colorize("✗ FAILED", "31"),
                    path_display,
                    duration_str,
                    message
                )
            }
        }
    }

    fn format_summary(&self, results: &ValidationResults) -> String {
        format!(
            "Validation Summary:\n  Total files: {}\n  Validated: {}\n  Timed out: {}\n  Failed: {}\n  Total time: {}\n",
            results.total_files,
            results.validated_files,
            results.timed_out_files,
            results.failed_files,
            format_duration(results.total_duration),
        )
    }

    fn format_tally(&self, tally: &ViolationTally) -> String {
        let mut output = format!(
            "Rule violations ({} distinct, {} total):\n",
            tally.distinct(),
            tally.total()
        );
        for entry in tally.to_sorted_entries() {
            output.push_str(&format!(
                "  {:>5}×  [{:?}] {} clause {} test {} - {}\n",
                entry.occurrences,
                entry.violation.family,
                entry.violation.specification,
                entry.violation.clause,
                entry.violation.test_number,
                entry.violation.description,
            ));
        }
        output
    }
}

/// Machine-readable aggregate of one validation run
#[derive(Debug, Serialize)]
struct JsonAggregate<'a> {
    total_files: usize,
    validated_files: usize,
    timed_out_files: usize,
    failed_files: usize,
    files: &'a [FileValidationResult],
    violations: Vec<ViolationCount>,
}

/// Render the whole run (per-file outcomes plus the violation tally) as
/// pretty-printed JSON.
pub fn render_json(
    results: &ValidationResults,
    tally: &ViolationTally,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonAggregate {
        total_files: results.total_files,
        validated_files: results.validated_files,
        timed_out_files: results.timed_out_files,
        failed_files: results.failed_files,
        files: &results.file_results,
        violations: tally.to_sorted_entries(),
    })
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        format!("{}m{:.0}s", (secs / 60.0) as u64, secs % 60.0)
    }
}
