//! Structured logging for the export driver.

use crate::job::{ConversionJob, JobStatus};
use crate::summary::RunSummary;
use tracing::{info, warn};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Exports slower than this are logged as a warning.
pub const SLOW_EXPORT_THRESHOLD_MS: i64 = 30_000;

/// Selects the JSON formatter when set to `json`.
pub const LOG_FORMAT_VAR: &str = "DRAWIO_EXPORT_LOG_FORMAT";

/// Installs the global tracing subscriber.
///
/// Should be called once at startup. Reads configuration from environment
/// variables:
/// - `RUST_LOG` - Filter directives (default: warn)
/// - `DRAWIO_EXPORT_LOG_FORMAT` - `json` for one JSON object per event
///
/// Logs go to stderr so the status lines on stdout stay clean.
///
/// # Returns
///
/// `Ok(())` once the subscriber is installed.
///
/// # Errors
///
/// - [`TryInitError`] if a global subscriber was already set
pub fn init_tracing() -> Result<(), TryInitError> {
    // Build filter from RUST_LOG, falling back to warn
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Select formatter
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}

/// Records the outcome of a finished job.
///
/// Emits one info event per job with its duration and status. Warnings are
/// added for:
/// - Exports slower than [`SLOW_EXPORT_THRESHOLD_MS`]
/// - Failed jobs, with the recorded error
///
/// Jobs that have not finished yet are ignored.
///
/// # Arguments
///
/// * `job` - The converted or failed job
pub fn record_job_telemetry(job: &ConversionJob) {
    let Some(duration_ms) = job.duration_ms() else {
        return;
    };

    // Log performance metrics
    info!(
        input = %job.input_path.display(),
        output = %job.output_path.display(),
        status = %job.status,
        staged = job.staged,
        duration_ms = duration_ms,
        "Diagram export finished"
    );

    // Warn if exceeding performance threshold
    if duration_ms > SLOW_EXPORT_THRESHOLD_MS {
        warn!(
            input = %job.input_path.display(),
            duration_ms = duration_ms,
            "Export exceeded {}ms",
            SLOW_EXPORT_THRESHOLD_MS
        );
    }

    // Record error details if job failed
    if job.status == JobStatus::Failed {
        if let Some(ref error) = job.error {
            warn!(input = %job.input_path.display(), error = %error, "Diagram export failed");
        }
    }
}

pub fn record_run_telemetry(summary: &RunSummary) {
    info!(
        converted = summary.converted,
        failed = summary.failed,
        skipped = summary.skipped,
        "Export run complete"
    );
}
