//! Web search tool
//!
//! Thin adapter over an injected [`WebSearchDriver`]: forwards the query,
//! hands driver results back unchanged, and converts any driver failure into
//! an error artifact naming the query and the driver.

use crate::artifact::Artifact;
use crate::drivers::WebSearchDriver;
use crate::tools::{Tool, ToolDescription, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Parameters for a search call
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Web search tool delegating to a pluggable search driver
pub struct WebSearchTool {
    driver: Arc<dyn WebSearchDriver>,
}

impl WebSearchTool {
    pub fn new(driver: Arc<dyn WebSearchDriver>) -> Self {
        Self { driver }
    }

    /// Run a search through the injected driver.
    ///
    /// Driver failures of any kind become an error artifact embedding the
    /// query and the driver's identifying name; they are never propagated.
    pub async fn search(&self, query: &str) -> Result<Artifact, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::InvalidParameters(
                "query must be a non-empty string".to_string(),
            ));
        }

        match self.driver.search(query).await {
            Ok(items) => {
                tracing::debug!(query, count = items.len(), "web search succeeded");
                Ok(Artifact::list(items))
            }
            Err(e) => {
                tracing::warn!(query, driver = self.driver.name(), error = %e, "web search failed");
                Ok(Artifact::error(format!(
                    "Error searching '{query}' with {}: {e}",
                    self.driver.name()
                )))
            }
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: "web_search".to_string(),
            description: "Can be used for searching the web".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Search engine request that returns a list of pages with titles, descriptions, and URLs"
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        }
    }

    async fn initialize(&mut self, _config: Option<&Value>) -> Result<(), ToolError> {
        Ok(())
    }

    async fn execute(&self, parameters: &Value) -> Result<Artifact, ToolError> {
        let request: SearchRequest = serde_json::from_value(parameters.clone())
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        self.search(&request.query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::DriverError;

    struct StaticDriver {
        items: Vec<Value>,
    }

    #[async_trait]
    impl WebSearchDriver for StaticDriver {
        fn name(&self) -> &str {
            "StaticDriver"
        }

        async fn search(&self, _query: &str) -> Result<Vec<Value>, DriverError> {
            Ok(self.items.clone())
        }
    }

    struct FailingDriver;

    #[async_trait]
    impl WebSearchDriver for FailingDriver {
        fn name(&self) -> &str {
            "FailingDriver"
        }

        async fn search(&self, _query: &str) -> Result<Vec<Value>, DriverError> {
            Err(DriverError::RequestFailed("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_search_returns_driver_items_unchanged() {
        let tool = WebSearchTool::new(Arc::new(StaticDriver {
            items: vec![json!("A"), json!("B")],
        }));

        let artifact = tool.search("best pizza").await.unwrap();

        assert_eq!(artifact.as_list().unwrap(), &[json!("A"), json!("B")]);
    }

    #[tokio::test]
    async fn test_search_failure_names_query_and_driver() {
        let tool = WebSearchTool::new(Arc::new(FailingDriver));

        let artifact = tool.search("xyz").await.unwrap();

        let msg = artifact.as_error().unwrap();
        assert!(msg.contains("Error searching 'xyz'"));
        assert!(msg.contains("FailingDriver"));
        assert!(msg.contains("timeout"));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let tool = WebSearchTool::new(Arc::new(StaticDriver { items: vec![] }));

        let result = tool.search("   ").await;
        assert!(matches!(result, Err(ToolError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_execute_with_missing_query() {
        let tool = WebSearchTool::new(Arc::new(StaticDriver { items: vec![] }));

        let result = tool.execute(&json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidParameters(_))));
    }

    #[test]
    fn test_tool_description() {
        let tool = WebSearchTool::new(Arc::new(StaticDriver { items: vec![] }));
        let description = tool.describe();

        assert_eq!(description.name, "web_search");
        assert!(!description.description.is_empty());
        assert_eq!(description.parameters["required"][0], "query");
    }
}
