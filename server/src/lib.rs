//! Shared plumbing for the `daily-report` and `seed` binaries.

pub mod commands;
pub mod config;

use std::process::ExitCode;

use platform_obs::shutdown_tracing;
use tracing::error;

/// Logs the error chain to stderr and maps the outcome to a process status.
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    };
    shutdown_tracing();
    code
}
