//! Serper-backed web search driver
//!
//! Sends queries to the Serper API and maps its `organic` results into the
//! crate's result item shape.

use crate::drivers::{DriverError, SearchResult, WebSearchDriver};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";

/// Web search driver calling the Serper API
pub struct SerperDriver {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    results_count: usize,
    country: String,
    language: String,
}

impl SerperDriver {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DriverError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            results_count: 5,
            country: "us".to_string(),
            language: "en".to_string(),
        })
    }

    /// Override the API endpoint, used to point at a mock server in tests
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_results_count(mut self, count: usize) -> Self {
        self.results_count = count;
        self
    }

    pub fn with_locale(mut self, country: impl Into<String>, language: impl Into<String>) -> Self {
        self.country = country.into();
        self.language = language.into();
        self
    }

    /// Build the request payload (pure function)
    fn build_payload(query: &str, results_count: usize, country: &str, language: &str) -> Value {
        json!({
            "q": query,
            "num": results_count,
            "gl": country,
            "hl": language
        })
    }

    /// Map the `organic` section of a Serper response to result items (pure function)
    fn parse_response(response: &Value, results_count: usize) -> Vec<Value> {
        let mut items = Vec::new();

        if let Some(organic) = response.get("organic").and_then(|o| o.as_array()) {
            for entry in organic.iter().take(results_count) {
                if let (Some(title), Some(link)) = (
                    entry.get("title").and_then(|t| t.as_str()),
                    entry.get("link").and_then(|l| l.as_str()),
                ) {
                    let snippet = entry.get("snippet").and_then(|s| s.as_str()).unwrap_or("");

                    items.push(
                        SearchResult {
                            title: title.to_string(),
                            url: link.to_string(),
                            description: snippet.to_string(),
                        }
                        .into_value(),
                    );
                }
            }
        }

        items
    }
}

#[async_trait]
impl WebSearchDriver for SerperDriver {
    fn name(&self) -> &str {
        "SerperDriver"
    }

    async fn search(&self, query: &str) -> Result<Vec<Value>, DriverError> {
        let payload = Self::build_payload(query, self.results_count, &self.country, &self.language);

        tracing::debug!(query, endpoint = %self.endpoint, "dispatching web search");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| DriverError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DriverError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DriverError::InvalidResponse(e.to_string()))?;

        Ok(Self::parse_response(&body, self.results_count))
    }
}
