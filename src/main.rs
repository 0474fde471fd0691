//! Jenkins failure report - main entry point.
//!
//! Pulls the test report of every configured job and writes a
//! `<timestamp>.xlsx` workbook with one failure summary sheet per job.

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use jfr_lib::config::Config;
use jfr_lib::error::AppResult;
use jfr_lib::services::pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - JFR_JOBS or JFR_JOBS_FILE must list at least one job URL");
            error!("  - JFR_BYPASS_PROXY must be true or false");
            error!("  - JFR_HTTP_TIMEOUT_SECS must be a whole number of seconds");
            error!("  - JFR_ON_JOB_ERROR must be 'empty' or 'abort'");
            std::process::exit(1);
        }
    };

    info!(
        "Reporting on {} job(s) (proxy bypass: {}, on job error: {})",
        config.jobs.len(),
        config.bypass_proxy,
        config.on_job_error
    );

    match pipeline::run(&config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Report failed: {}", e);
            Err(e)
        }
    }
}
