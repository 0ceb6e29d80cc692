//! Minimal HTTP seam used by the feed adapters.
//!
//! Adapters only ever need "GET this URL, give me status and body". Keeping
//! that behind a trait lets tests count requests and script failures without
//! a network.

use std::time::Duration;

use async_trait::async_trait;

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::{SkyError, SkyResult};

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET. Transport failures (DNS, timeout, TLS) are errors;
    /// any HTTP status is a successful response.
    async fn get(&self, url: &str) -> SkyResult<HttpResponse>;
}

/// `reqwest`-backed client with a fixed request timeout.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> SkyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("skyevents/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkyError::Http(e.to_string()))?;
        Ok(ReqwestClient { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> SkyResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SkyError::Http(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SkyError::Http(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
