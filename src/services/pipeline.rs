//! Report run: fetch, extract, aggregate and write one sheet per job.

use std::path::PathBuf;

use chrono::Local;
use tracing::{info, warn};

use crate::config::{Config, FailurePolicy};
use crate::error::{AppError, AppResult, JobFailure};
use crate::models::{FailureGroup, JobRef};
use crate::services::aggregation::aggregate;
use crate::services::extraction::extract;
use crate::services::fetcher::{FetchSettings, ReportFetcher};
use crate::services::workbook::{ReportWriter, output_file_name};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Workbook that was written
    pub output_path: PathBuf,
    /// Sheet names in job order
    pub sheet_names: Vec<String>,
    /// Jobs whose report could not be fetched or parsed
    pub degraded_jobs: Vec<String>,
}

impl RunSummary {
    pub fn sheets_written(&self) -> usize {
        self.sheet_names.len()
    }
}

/// Run the report for every configured job, naming the file after the current time.
pub async fn run(config: &Config) -> AppResult<RunSummary> {
    let path = config.output_dir.join(output_file_name(&Local::now()));
    run_to(config, path).await
}

/// Run the report for every configured job and save the workbook to `path`.
///
/// Jobs are processed one at a time, in configuration order.
pub async fn run_to(config: &Config, path: PathBuf) -> AppResult<RunSummary> {
    let fetcher = ReportFetcher::new(&FetchSettings {
        bypass_proxy: config.bypass_proxy,
        timeout: config.http_timeout,
    })
    .map_err(AppError::Client)?;

    let urls: Vec<&str> = config.jobs.iter().map(JobRef::as_str).collect();
    info!("Ready to fetch data for jobs: {:?}", urls);

    let mut writer = ReportWriter::open(&path);
    let mut degraded_jobs = Vec::new();

    for job in &config.jobs {
        info!("Handling job {}", job);

        let groups = match job_failures(&fetcher, job).await {
            Ok(groups) => groups,
            Err(reason) => match config.on_job_error {
                FailurePolicy::Abort => {
                    return Err(AppError::JobFailed {
                        job: job.to_string(),
                        reason,
                    });
                }
                FailurePolicy::EmptySheet => {
                    warn!("No report for job {} ({}), writing empty sheet", job, reason);
                    degraded_jobs.push(job.to_string());
                    Vec::new()
                }
            },
        };

        writer.write_sheet(&job.sheet_name(), &groups)?;
    }

    let summary = writer.close()?;
    info!("Export complete: {} sheet(s).", summary.sheet_names.len());
    info!("Report written to {}", summary.path.display());
    if !degraded_jobs.is_empty() {
        warn!("{} job(s) had no usable test report", degraded_jobs.len());
    }

    Ok(RunSummary {
        output_path: summary.path,
        sheet_names: summary.sheet_names,
        degraded_jobs,
    })
}

/// Fetch one job's report and group its failures.
async fn job_failures(
    fetcher: &ReportFetcher,
    job: &JobRef,
) -> Result<Vec<FailureGroup>, JobFailure> {
    let payload = fetcher.fetch_test_report(job).await?;
    let records = extract(&payload)?;
    Ok(aggregate(&records))
}
