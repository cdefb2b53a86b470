use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{Client, Response, StatusCode};

use crate::config::{PipelineConfig, RETRY_STATUS_FORCELIST};

/// The two families of endpoint this crate reads from (§6). HTML reports and
/// the JSON gamecenter API live on different hosts and are decoded
/// differently (ISO-8859-1 text vs JSON), so callers pick a variant instead
/// of building a URL by hand.
#[derive(Debug, Clone, Copy)]
pub enum NhlEndpoint {
    ApiWeb,
    HtmlReports,
}

impl NhlEndpoint {
    pub fn base_url(&self) -> &'static str {
        match self {
            NhlEndpoint::ApiWeb => "https://api-web.nhle.com/v1/",
            NhlEndpoint::HtmlReports => "https://www.nhl.com/scores/htmlreports/",
        }
    }
}

/// Thin HTTP transport with the retry/backoff policy described in §5.
/// Contains no parsing or reconciliation logic; see `crate::client::Client`
/// for the typed endpoints built on top of it.
pub struct HttpClient {
    config: PipelineConfig,
    client: Client,
}

impl HttpClient {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn is_retryable(status: StatusCode) -> bool {
        RETRY_STATUS_FORCELIST.contains(&status.as_u16())
    }

    async fn send_with_retry(&self, url: &str) -> Result<Response> {
        let mut attempt = 0u32;
        loop {
            if self.config.debug {
                tracing::debug!(url, attempt, "GET");
            }
            let result = self.client.get(url).send().await;
            match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if attempt < self.config.max_retries && Self::is_retryable(response.status()) => {
                    attempt += 1;
                    tokio::time::sleep(self.backoff(attempt)).await;
                    continue;
                }
                Ok(response) => {
                    return Err(anyhow!(
                        "request to {} failed with status {}",
                        url,
                        response.status()
                    ))
                }
                Err(err) if attempt < self.config.max_retries && err.is_timeout() => {
                    attempt += 1;
                    tokio::time::sleep(self.backoff(attempt)).await;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.config.retry_backoff_base * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: NhlEndpoint,
        resource: &str,
        query_params: Option<HashMap<String, String>>,
    ) -> Result<T> {
        let url = format!("{}{}", endpoint.base_url(), resource);
        let mut request = self.client.get(&url);
        if let Some(params) = &query_params {
            request = request.query(params);
        }
        // query params don't flow through send_with_retry's plain GET, so only
        // use that path when there are none.
        let response = if query_params.is_some() {
            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(anyhow!("request to {} failed with status {}", url, response.status()));
            }
            response
        } else {
            self.send_with_retry(&url).await?
        };
        Ok(response.json::<T>().await?)
    }

    /// Fetch an HTML report and decode it as ISO-8859-1 per §6, since NHL.com
    /// serves these pages without a UTF-8-compatible charset.
    pub async fn get_latin1_text(&self, endpoint: NhlEndpoint, resource: &str) -> Result<String> {
        let url = format!("{}{}", endpoint.base_url(), resource);
        let response = self.send_with_retry(&url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}
