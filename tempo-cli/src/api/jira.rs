//! Jira REST client
//!
//! One operation: search issues by key, requesting only the key and the
//! Tempo account custom field. A single page is fetched; callers asking
//! for more keys than the page holds get a warning, not an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SEARCH_PATH: &str = "/rest/api/2/search";

/// Jira custom field that carries the Tempo account link
pub const TEMPO_ACCOUNT_FIELD: &str = "io.tempo.jira__account";

/// Upper bound on issues returned by one search
pub const MAX_RESULTS: usize = 200;

pub struct JiraClient {
    http: reqwest::Client,
    endpoint: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(endpoint: &str, email: &str, api_token: &str) -> Result<Self> {
        Ok(Self {
            http: super::http_client()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Search issues by key. Keys that do not resolve are simply absent
    /// from the result.
    pub async fn search_issues(&self, keys: &[String]) -> Result<Vec<Issue>> {
        if keys.len() > MAX_RESULTS {
            log::warn!(
                "{} keys requested but Jira returns at most {} issues per search",
                keys.len(),
                MAX_RESULTS
            );
        }

        let request = search_request(keys);
        let url = format!("{}{}", self.endpoint, SEARCH_PATH);
        log::debug!("POST {} jql={}", url, request.jql);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Jira request to {} failed", url))?;
        let response = super::check_status(response, "Jira issue search").await?;

        let search: SearchResponse = response
            .json()
            .await
            .context("Failed to decode Jira search response")?;
        log::debug!(
            "Jira returned {} of {} matching issue(s)",
            search.issues.len(),
            search.total
        );

        Ok(search.issues)
    }
}

fn search_request(keys: &[String]) -> SearchRequest {
    SearchRequest {
        jql: keys_jql(keys),
        validate_query: "none",
        fields: vec!["key", TEMPO_ACCOUNT_FIELD],
        properties: vec!["internal"],
        start_at: 0,
        max_results: MAX_RESULTS,
    }
}

/// JQL `key in (...)` clause with every key quoted
fn keys_jql(keys: &[String]) -> String {
    let quoted: Vec<String> = keys.iter().map(|key| quote_key(key)).collect();
    format!("key in ({})", quoted.join(","))
}

fn quote_key(key: &str) -> String {
    format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    jql: String,
    validate_query: &'static str,
    fields: Vec<&'static str>,
    properties: Vec<&'static str>,
    start_at: usize,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<Issue>,
}

/// One issue from the search response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: Option<IssueFields>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueFields {
    #[serde(rename = "io.tempo.jira__account", default)]
    pub tempo_account: Option<AccountReference>,
}

/// Link from an issue to a Tempo account. Only the id is used; the
/// other properties Jira sends along are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccountReference {
    pub id: i64,
}
