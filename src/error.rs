//! Domain error types for the failure report.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Each service owns its own error enum; `AppError` is what ends a run.

use crate::config::ConfigError;
use crate::services::extraction::ExtractError;
use crate::services::fetcher::FetchError;
use crate::services::workbook::WorkbookError;

/// Application-level errors. Any of these is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(FetchError),

    /// Workbook could not be written
    #[error("Workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// A job failed and the configured policy is to abort
    #[error("Job {job} failed: {reason}")]
    JobFailed { job: String, reason: JobFailure },
}

/// Why a single job produced no records.
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
