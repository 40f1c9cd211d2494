//! Pluggable search driver capability
//!
//! The web search tool does not talk to any search engine itself; it
//! delegates to an injected [`WebSearchDriver`]. Drivers return plain JSON
//! result items so the tool can hand them to the framework unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod serper;

pub use serper::SerperDriver;

/// A single page returned by a search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SearchResult {
    /// Convert to the JSON item shape carried inside list artifacts
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Capability contract for performing a web search
#[async_trait]
pub trait WebSearchDriver: Send + Sync {
    /// Identifying name used in error messages (e.g. "SerperDriver")
    fn name(&self) -> &str;

    /// Run the query and return result items in engine order
    async fn search(&self, query: &str) -> Result<Vec<Value>, DriverError>;
}

/// Search driver failures
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("search API returned {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
