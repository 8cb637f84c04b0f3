mod retry;
mod urls;

pub use urls::{is_report_url, load_urls, slug_for};

use std::time::Duration;

use crate::config::Config;
use crate::error::FetchError;
use retry::retry_transient;

/// HTTP client for report pages. Fetching is the only I/O in the
/// pipeline; extraction itself never touches the network.
pub struct ReportFetcher {
    client: reqwest::Client,
    retry: crate::config::RetryConfig,
}

impl ReportFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            retry: config.retry,
        })
    }

    /// Fetch one report page as text. Transient failures (transport,
    /// 5xx) are retried with backoff; anything else fails immediately
    /// and the caller skips the document.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        retry_transient(&self.retry, || self.fetch_once(url)).await
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })
    }
}
