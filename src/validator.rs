//! Validation orchestration: one engine run per target, batches of targets
//! validated concurrently.
//!
//! Each target goes through a strictly sequential pipeline — invoke the
//! engine, stabilize its output file, extract the report section, parse it —
//! and every step's failure mode stays independently visible. Batch runs
//! spawn one tokio task per target, bounded by a semaphore, and gather
//! per-file results with `try_join_all`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::extract::{self, SUMMARY_TAG, VALIDATION_REPORT_TAG};
use crate::invoker;
use crate::report::{self, ValidationReport};
use crate::stabilize;

/// Validation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Path to the external validation engine binary
    pub engine_path: PathBuf,
    /// Wall-clock budget for one engine run
    pub timeout: Duration,
    /// Number of concurrent validations
    pub max_concurrent_validations: usize,
    /// Directory receiving per-invocation engine output files
    pub work_dir: PathBuf,
    /// Output-stabilization re-read attempts
    pub poll_attempts: u32,
    /// Pause between output-stabilization re-reads
    pub poll_interval: Duration,
}

impl ValidationConfig {
    /// Configuration with the engine's observed defaults: a 20 minute
    /// wall-clock budget and 10 × 100ms output polling.
    pub fn new(engine_path: PathBuf) -> Self {
        Self {
            engine_path,
            timeout: Duration::from_secs(20 * 60),
            max_concurrent_validations: num_cpus::get(),
            work_dir: std::env::temp_dir(),
            poll_attempts: stabilize::DEFAULT_MAX_ATTEMPTS,
            poll_interval: stabilize::DEFAULT_POLL_INTERVAL,
        }
    }
}

/// User-visible status of a single target validation.
///
/// Timeouts and other failures are distinct statuses because the job layer
/// treats them differently: a timed-out target may be worth retrying, a
/// failed one carries engine diagnostics for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Engine produced a usable report
    Validated,
    /// Engine exceeded the wall-clock budget
    TimedOut,
    /// Engine completed but no usable report came out of it
    Failed { message: String },
}

impl ValidationStatus {
    pub fn is_validated(&self) -> bool {
        matches!(self, ValidationStatus::Validated)
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, ValidationStatus::TimedOut)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ValidationStatus::Failed { .. })
    }
}

/// Result of validating a single target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileValidationResult {
    /// Path to the validated document
    pub path: PathBuf,
    /// Validation status
    pub status: ValidationStatus,
    /// Typed report, present exactly when the status is `Validated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
    /// Duration of the whole pipeline for this target
    pub duration: Duration,
}

impl FileValidationResult {
    pub fn validated(path: PathBuf, report: ValidationReport, duration: Duration) -> Self {
        Self {
            path,
            status: ValidationStatus::Validated,
            report: Some(report),
            duration,
        }
    }

    pub fn timed_out(path: PathBuf, duration: Duration) -> Self {
        Self {
            path,
            status: ValidationStatus::TimedOut,
            report: None,
            duration,
        }
    }

    pub fn failed(path: PathBuf, error: &ValidationError, duration: Duration) -> Self {
        Self {
            path,
            status: ValidationStatus::Failed {
                message: error.to_string(),
            },
            report: None,
            duration,
        }
    }

    /// Map a pipeline outcome onto the three-way status contract.
    pub fn from_outcome(
        path: PathBuf,
        outcome: Result<ValidationReport>,
        duration: Duration,
    ) -> Self {
        match outcome {
            Ok(report) => Self::validated(path, report, duration),
            Err(error) if error.is_timeout() => Self::timed_out(path, duration),
            Err(error) => Self::failed(path, &error, duration),
        }
    }
}

/// Aggregated results of validating multiple targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResults {
    pub total_files: usize,
    pub validated_files: usize,
    pub timed_out_files: usize,
    pub failed_files: usize,
    pub total_duration: Duration,
    pub average_duration: Duration,
    pub file_results: Vec<FileValidationResult>,
}

impl ValidationResults {
    /// Aggregate individual file results into summary counts.
    pub fn aggregate(file_results: Vec<FileValidationResult>) -> Self {
        let total_files = file_results.len();
        let mut validated_files = 0;
        let mut timed_out_files = 0;
        let mut failed_files = 0;
        let mut total_duration = Duration::ZERO;

        for result in &file_results {
            match result.status {
                ValidationStatus::Validated => validated_files += 1,
                ValidationStatus::TimedOut => timed_out_files += 1,
                ValidationStatus::Failed { .. } => failed_files += 1,
            }
            total_duration += result.duration;
        }

        let average_duration = if total_files > 0 {
            total_duration / total_files as u32
        } else {
            Duration::ZERO
        };

        Self {
            total_files,
            validated_files,
            timed_out_files,
            failed_files,
            total_duration,
            average_duration,
            file_results,
        }
    }

    pub fn all_validated(&self) -> bool {
        self.validated_files == self.total_files && self.total_files > 0
    }

    pub fn has_failures(&self) -> bool {
        self.timed_out_files > 0 || self.failed_files > 0
    }

    /// Iterate the typed reports of every validated target.
    pub fn reports(&self) -> impl Iterator<Item = &ValidationReport> {
        self.file_results.iter().filter_map(|r| r.report.as_ref())
    }
}

/// Orchestrates the per-target pipeline and concurrent batch validation.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Result<Self> {
        if config.max_concurrent_validations == 0 {
            return Err(ValidationError::Config(
                "max_concurrent_validations must be greater than 0".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run one target through the full pipeline, returning its typed report
    /// or the typed failure.
    ///
    /// The engine output file gets a unique name under the work directory,
    /// so concurrent validations of different targets never collide, and is
    /// deleted on every exit path.
    pub async fn validate_file(&self, target: &Path) -> Result<ValidationReport> {
        let output_path = self
            .config
            .work_dir
            .join(format!("report-{}.mrr", Uuid::new_v4()));

        let outcome = self.run_pipeline(target, &output_path).await;
        let _ = tokio::fs::remove_file(&output_path).await;
        outcome
    }

    async fn run_pipeline(&self, target: &Path, output_path: &Path) -> Result<ValidationReport> {
        invoker::invoke(&self.config.engine_path, target, output_path, self.config.timeout)
            .await?;

        let raw = stabilize::stabilize(output_path, self.config.poll_attempts, self.config.poll_interval)
            .await?;

        let fragment = match extract::extract(&raw, VALIDATION_REPORT_TAG) {
            Ok(fragment) => fragment,
            Err(ValidationError::MalformedOutput { .. }) if !raw.trim().is_empty() => {
                // The engine wrote something, but not a report: an error
                // path. Preserve the text for diagnostics.
                return Err(ValidationError::ProcessError { output: raw });
            }
            Err(e) => return Err(e),
        };

        let mut report = report::parse_report(&fragment).inspect_err(|_| {
            tracing::warn!(%fragment, target = %target.display(), "engine report rejected");
        })?;
        report.engine_summary = extract::extract(&raw, SUMMARY_TAG).ok();

        Ok(report)
    }

    /// Validate a list of targets concurrently, yielding one result per
    /// target with the three-way status mapping applied.
    pub async fn validate_files(&self, files: Vec<PathBuf>) -> Result<Vec<FileValidationResult>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(tokio::sync::Semaphore::new(
            self.config.max_concurrent_validations,
        ));

        let validation_tasks: Vec<_> = files
            .into_iter()
            .map(|file_path| {
                let engine = self.clone();
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.map_err(|_| {
                        ValidationError::Concurrency {
                            details: "validation semaphore closed".to_string(),
                        }
                    })?;

                    let start = Instant::now();
                    let outcome = engine.validate_file(&file_path).await;
                    let duration = start.elapsed();

                    if let Err(ref error) = outcome {
                        tracing::warn!(target = %file_path.display(), %error, "validation failed");
                    }

                    Ok::<FileValidationResult, ValidationError>(FileValidationResult::from_outcome(
                        file_path, outcome, duration,
                    ))
                })
            })
            .collect();

        let task_results = try_join_all(validation_tasks)
            .await
            .map_err(|e| ValidationError::Concurrency {
                details: format!("task join error: {e}"),
            })?;

        let mut file_results = Vec::with_capacity(task_results.len());
        for result in task_results {
            file_results.push(result?);
        }

        Ok(file_results)
    }
}
