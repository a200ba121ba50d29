//! Populates the database with the demo fixture set.
//!
//! Takes no arguments; configuration comes from the environment (or `.env`).
//! Exits 0 on success and 1 on any error.

use std::process::ExitCode;

use platform_obs::{ObsConfig, init_tracing};
use server::{commands, config::AppConfig, finish};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    if let Err(err) = init_tracing(ObsConfig::for_service("daily-report-seed")) {
        eprintln!("failed to initialise tracing: {err:#}");
        return ExitCode::FAILURE;
    }
    let result = async {
        let config = AppConfig::load()?;
        commands::seed(&config).await.map(|_| ())
    }
    .await;
    finish(result)
}
