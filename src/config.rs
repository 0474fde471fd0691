//! Application configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::JobRef;

/// Built-in values used when no environment override is present.
pub mod defaults {
    /// Jobs included in the report, one build URL per line.
    pub const JOB_URLS: &str = "http://jenkins/view/xyz/job/your-project/10042/
http://jenkins/view/xyz/job/your-project/10043/";
    pub const OUTPUT_DIR: &str = ".";
    pub const BYPASS_PROXY: bool = true;
}

/// What to do when a job's report cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Write a header-only sheet for the job and continue with the next one.
    EmptySheet,
    /// Stop the run without writing the workbook.
    Abort,
}

impl FailurePolicy {
    /// Parse policy from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "skip" => Some(Self::EmptySheet),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySheet => write!(f, "empty"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Jobs to report on, in processing order
    pub jobs: Vec<JobRef>,
    /// Directory the workbook is written into
    pub output_dir: PathBuf,
    /// Ignore proxy settings from the environment
    pub bypass_proxy: bool,
    /// Whole-request timeout; `None` waits forever
    pub http_timeout: Option<Duration>,
    /// Behavior when a job yields no usable report
    pub on_job_error: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs: parse_job_list(defaults::JOB_URLS),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            bypass_proxy: defaults::BYPASS_PROXY,
            http_timeout: None,
            on_job_error: FailurePolicy::EmptySheet,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; with none set the built-in job list is
    /// used, the proxy is bypassed and the workbook lands in the working
    /// directory.
    ///
    /// Environment variables:
    /// - `JFR_JOBS_FILE`: File with one job URL per line (wins over `JFR_JOBS`)
    /// - `JFR_JOBS`: Job URLs separated by newlines or commas
    /// - `JFR_OUTPUT_DIR`: Output directory (default: .)
    /// - `JFR_BYPASS_PROXY`: true/false (default: true)
    /// - `JFR_HTTP_TIMEOUT_SECS`: Request timeout in seconds (default: none)
    /// - `JFR_ON_JOB_ERROR`: empty/abort (default: empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        let jobs = if let Ok(path) = env::var("JFR_JOBS_FILE") {
            read_job_file(Path::new(&path))?
        } else if let Ok(list) = env::var("JFR_JOBS") {
            parse_job_list(&list.replace(',', "\n"))
        } else {
            parse_job_list(defaults::JOB_URLS)
        };

        if jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }

        let output_dir = env::var("JFR_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::OUTPUT_DIR));

        let bypass_proxy = match env::var("JFR_BYPASS_PROXY") {
            Ok(v) => parse_bool(&v)
                .ok_or(ConfigError::InvalidValue("JFR_BYPASS_PROXY must be true or false"))?,
            Err(_) => defaults::BYPASS_PROXY,
        };

        let http_timeout = env::var("JFR_HTTP_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    ConfigError::InvalidValue("JFR_HTTP_TIMEOUT_SECS must be a valid number")
                })
            })
            .transpose()?;

        let on_job_error = match env::var("JFR_ON_JOB_ERROR") {
            Ok(v) => FailurePolicy::parse(&v)
                .ok_or(ConfigError::InvalidValue("JFR_ON_JOB_ERROR must be 'empty' or 'abort'"))?,
            Err(_) => FailurePolicy::EmptySheet,
        };

        Ok(Config {
            jobs,
            output_dir,
            bypass_proxy,
            http_timeout,
            on_job_error,
        })
    }
}

/// Parse a block of job URLs, one per line.
///
/// Blank lines and `#` comments are skipped; every URL is normalized to end with `/`.
pub fn parse_job_list(block: &str) -> Vec<JobRef> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(JobRef::parse)
        .collect()
}

fn read_job_file(path: &Path) -> Result<Vec<JobRef>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::JobsFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_job_list(&content))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("No job URLs configured")]
    NoJobs,

    #[error("Failed to read job list {}: {source}", path.display())]
    JobsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
