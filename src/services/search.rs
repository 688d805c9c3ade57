// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Web search client used by the enrichment lookups.
//!
//! Results carry no schema guarantee, so every field is optional and the
//! lookups decide what a usable result looks like.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Errors from the search backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search API key is not configured")]
    MissingApiKey,

    #[error("search request failed: {0}")]
    Request(String),

    #[error("search API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse search response: {0}")]
    Parse(String),
}

/// Free-text web search.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a query and return results in ranked order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// Tavily search API client.
#[derive(Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: u32,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

impl TavilyClient {
    /// Create a client. A missing key is reported on each search, not here.
    pub fn new(api_key: Option<String>, max_results: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.tavily.com".to_string(),
            api_key,
            max_results,
        }
    }

    /// Point the client at a different host (for local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check response status and parse the result list.
    async fn parse_response(response: reqwest::Response) -> Result<Vec<SearchResult>, SearchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Search rate limit hit (429)");
            }
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(body.results)
    }
}

#[async_trait]
impl SearchBackend for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        tracing::debug!(query, "Running web search");

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(api_key)
            .json(&TavilyRequest {
                query,
                max_results: self.max_results,
            })
            .send()
            .await
            .map_err(|e| SearchError::Request(e.without_url().to_string()))?;

        Self::parse_response(response).await
    }
}
