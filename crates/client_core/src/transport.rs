//! Outbound call to the job search service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ServiceErrorBody,
    protocol::{ScrapeJobsRequest, ScrapeJobsResponse},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{ConfigError, Settings},
    error::SearchError,
};

#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn scrape_jobs(
        &self,
        request: &ScrapeJobsRequest,
    ) -> Result<ScrapeJobsResponse, SearchError>;
}

pub struct HttpSearchTransport {
    http: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpSearchTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SearchError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TransportSetupError> {
        let endpoint = settings.scrape_jobs_url()?;
        Ok(Self::new(endpoint, settings.request_timeout())?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify_send_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout(self.timeout)
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] SearchError),
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    async fn scrape_jobs(
        &self,
        request: &ScrapeJobsRequest,
    ) -> Result<ScrapeJobsResponse, SearchError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| self.classify_send_error(err))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|err| self.classify_send_error(err))?;
        debug!(status = status.as_u16(), bytes = body.len(), "job search response received");

        if !status.is_success() {
            let detail = ServiceErrorBody::from_bytes(&body).detail;
            warn!(status = status.as_u16(), detail = ?detail, "job search service returned an error");
            return Err(SearchError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice::<ScrapeJobsResponse>(&body).map_err(|err| {
            warn!("job search response did not match the expected shape: {err}");
            SearchError::MalformedResponse(err.to_string())
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
