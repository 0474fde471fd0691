//! HTTP fetcher for Jenkins test-report payloads.

use std::time::Duration;

use tracing::{info, warn};

use crate::models::JobRef;

/// Network policy for a [`ReportFetcher`].
#[derive(Debug, Clone, Default)]
pub struct FetchSettings {
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY`/system proxy settings
    pub bypass_proxy: bool,
    /// Whole-request timeout; `None` waits forever
    pub timeout: Option<Duration>,
}

/// Why a fetch produced no payload.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect or other transport-level failure
    #[error("connection error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Body was not valid UTF-8
    #[error("response body is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Plain GET client for the Jenkins REST API. Sends no credentials and never retries.
#[derive(Debug, Clone)]
pub struct ReportFetcher {
    http_client: reqwest::Client,
}

impl ReportFetcher {
    /// Create a new fetcher from settings.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if settings.bypass_proxy {
            builder = builder.no_proxy();
        }
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(FetchError::Client)?;

        Ok(Self { http_client })
    }

    /// GET `url` and return the body as text.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("GET {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!("Connection error: {}", e);
            FetchError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error: {}", status.as_u16());
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!("Failed to read body from {}: {}", url, e);
            FetchError::Body(e)
        })?;

        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Fetch the test-report payload for one job build.
    pub async fn fetch_test_report(&self, job: &JobRef) -> Result<String, FetchError> {
        self.fetch(&job.report_url()).await
    }
}
