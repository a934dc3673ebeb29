//! HTTP client for the array's diagnostic status page
//!
//! Each fetch is independent: a fresh request, a fresh document, no retries.
//! A probe that cannot get a document fails as a whole.

use crate::auth::Credentials;
use nexsan_core::{NexsanError, Result};
use nexsan_metrics::StatusTree;
use std::net::Ipv6Addr;
use std::time::Duration;

/// Path of the status document on the array's web interface
pub const OPSTATS_PATH: &str = "/admin/opstats.asp";

/// Client for fetching status documents from arrays
#[derive(Debug, Clone)]
pub struct ProbeClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl ProbeClient {
    /// Create a new client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nexsan-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NexsanError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the raw status document from `target`
    pub async fn fetch_body(&self, target: &str, credentials: &Credentials) -> Result<String> {
        let url = opstats_url(target);
        tracing::debug!("Fetching {} as {}", url, credentials.user);

        let response = self
            .http
            .get(&url)
            .basic_auth(&credentials.user, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| request_error(target, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(NexsanError::Auth(target.to_string()));
        }
        if !status.is_success() {
            return Err(NexsanError::Fetch(format!(
                "{} returned HTTP {}",
                target, status
            )));
        }

        response.text().await.map_err(|e| request_error(target, e))
    }

    /// Fetch and parse the status document from `target`
    pub async fn fetch(&self, target: &str, credentials: &Credentials) -> Result<StatusTree> {
        let body = self.fetch_body(target, credentials).await?;
        let tree = StatusTree::parse(&body)?;
        tracing::debug!("Parsed {} status nodes from {}", tree.len(), target);
        Ok(tree)
    }
}

fn request_error(target: &str, e: reqwest::Error) -> NexsanError {
    if e.is_timeout() {
        NexsanError::Timeout(target.to_string())
    } else if e.is_connect() {
        NexsanError::Fetch(format!("Cannot connect to {}: {}", target, e))
    } else {
        NexsanError::Fetch(format!("Request to {} failed: {}", target, e))
    }
}

/// URL of the status document for a probe target.
///
/// The target is usually a bare host name or address; a full `http(s)://` base
/// URL is also accepted. Bare IPv6 addresses are bracketed.
pub fn opstats_url(target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http://") || target.starts_with("https://") {
        return format!("{}{}", target.trim_end_matches('/'), OPSTATS_PATH);
    }
    match target.parse::<Ipv6Addr>() {
        Ok(addr) => format!("http://[{}]{}", addr, OPSTATS_PATH),
        Err(_) => format!("http://{}{}", target, OPSTATS_PATH),
    }
}
