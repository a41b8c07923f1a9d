//! Bounded polling for engine output that is slow to reach the disk.
//!
//! The engine has been observed to signal process completion before its
//! report stream is fully flushed, so the first read of the output file can
//! come back empty even though a report is on the way.

use std::path::Path;
use std::time::Duration;

use tokio::fs;
use tokio::time::sleep;

use crate::error::Result;

/// Default number of re-reads before giving up on the output filling.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default pause between re-reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait for the engine's output file to stabilize and return its content.
///
/// A non-empty first read returns immediately. An empty read is retried up
/// to `max_attempts` times at `poll_interval`. Content still empty after the
/// last attempt is returned as-is: emptiness is not an error here, it fails
/// later during tag extraction.
pub async fn stabilize(
    output_path: &Path,
    max_attempts: u32,
    poll_interval: Duration,
) -> Result<String> {
    let mut content = fs::read_to_string(output_path).await?;
    if !content.is_empty() {
        return Ok(content);
    }

    for attempt in 1..=max_attempts {
        tracing::debug!(
            attempt,
            max_attempts,
            path = %output_path.display(),
            "engine output empty, waiting"
        );
        sleep(poll_interval).await;

        content = fs::read_to_string(output_path).await?;
        if !content.is_empty() {
            break;
        }
    }

    Ok(content)
}
