//! Subprocess invocation of the external validation engine.
//!
//! The engine is driven with a fixed argument contract and its stdout is
//! redirected straight into the output file so the machine-readable report
//! is captured verbatim, never interleaved with interactive streams. The
//! exit status is not authoritative for success: the engine has been
//! observed to exit zero with unusable output and vice versa, so success is
//! judged downstream from the output content.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{Result, ValidationError};

/// Report format flag passed to the engine.
const MRR_FORMAT: &str = "mrr";

/// Run the engine against one input file, capturing stdout at `output_path`.
///
/// Builds `<engine_path> --format mrr <input_file>` and waits up to
/// `wait_budget` wall-clock for the process to exit. An in-time exit with
/// any exit code is `Ok(())`; an expired budget kills the child, discards
/// the partial output file and fails with [`ValidationError::Timeout`].
///
/// The caller must not reuse `output_path` for a concurrent invocation;
/// the file is created (or truncated) here.
pub async fn invoke(
    engine_path: &Path,
    input_file: &Path,
    output_path: &Path,
    wait_budget: Duration,
) -> Result<()> {
    let output_file = std::fs::File::create(output_path)?;

    let mut cmd = Command::new(engine_path);
    // `kill_on_drop(true)` ensures the child is killed when dropped (e.g. on timeout).
    cmd.arg("--format")
        .arg(MRR_FORMAT)
        .arg(input_file)
        .stdin(Stdio::null())
        .stdout(Stdio::from(output_file))
        .kill_on_drop(true);

    tracing::debug!(
        engine = %engine_path.display(),
        input = %input_file.display(),
        output = %output_path.display(),
        "invoking validation engine"
    );

    let mut child = cmd.spawn()?;

    match timeout(wait_budget, child.wait()).await {
        Ok(Ok(status)) => {
            tracing::debug!(?status, input = %input_file.display(), "engine exited");
            Ok(())
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_elapsed) => {
            // `child` is dropped here, which kills the process. The partial
            // output must not reach parsing.
            let _ = tokio::fs::remove_file(output_path).await;
            Err(ValidationError::Timeout {
                file: input_file.to_path_buf(),
                timeout: wait_budget,
            })
        }
    }
}
