//! Tempo REST client
//!
//! One operation: list accounts. Only the first page is fetched; when
//! the response advertises a next page a warning points at the limit.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tempo cloud API base
pub const DEFAULT_BASE_URL: &str = "https://api.tempo.io/4";

/// Accounts fetched per run unless overridden
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

pub struct TempoClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl TempoClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        Ok(Self {
            http: super::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Fetch the first page of accounts
    pub async fn list_accounts(&self, limit: u32) -> Result<Vec<Account>> {
        let url = format!("{}/accounts", self.base_url);
        log::debug!("GET {} limit={}", url, limit);

        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit)])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .with_context(|| format!("Tempo request to {} failed", url))?;
        let response = super::check_status(response, "Tempo account listing").await?;

        let page: PagedAccounts = response
            .json()
            .await
            .context("Failed to decode Tempo accounts response")?;

        if let Some(metadata) = &page.metadata {
            log::debug!("Tempo returned {} account(s)", metadata.count);
            if metadata.next.is_some() {
                log::warn!(
                    "Tempo has more accounts than the page limit {}; raise --account-limit to fetch them",
                    limit
                );
            }
        }

        Ok(page.results)
    }
}

/// One Tempo account
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub id: i64,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct PagedAccounts {
    #[serde(default)]
    metadata: Option<PageMetadata>,
    #[serde(default)]
    results: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct PageMetadata {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    next: Option<String>,
}
