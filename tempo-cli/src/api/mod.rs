//! HTTP clients for the Jira and Tempo REST APIs

pub mod jira;
pub mod tempo;

use std::time::Duration;

use anyhow::{Context, Result, bail};

pub use jira::{Issue, JiraClient};
pub use tempo::{Account, TempoClient};

/// Timeout applied to every outgoing request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Turn a non-success response into an error carrying the body text
pub(crate) async fn check_status(
    response: reqwest::Response,
    operation: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        bail!("{} failed with status {}", operation, status);
    }
    bail!("{} failed with status {}: {}", operation, status, body);
}
