//! Tool system exposed to the invoking agent framework
//!
//! Tools are thin adapters over external capabilities. Each tool declares a
//! JSON Schema for its parameters; the registry validates parameters against
//! that schema before dispatch. Expected external failures never surface as
//! `Err` — they come back as an error [`Artifact`] so the framework only
//! handles one output shape.

use crate::artifact::Artifact;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub mod google_drive;
pub mod web_search;

pub use google_drive::GoogleDriveTool;
pub use web_search::WebSearchTool;

/// Tool interface consumed by the agent framework
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name, description, and JSON Schema for its parameters
    fn describe(&self) -> ToolDescription;

    /// Receives the tool's configuration section, called once at startup
    async fn initialize(&mut self, config: Option<&Value>) -> Result<(), ToolError>;

    /// Executes the tool with parameters already validated against the schema
    /// from `describe()`. Expected external failures are returned as an error
    /// artifact, never as `Err`.
    async fn execute(&self, parameters: &Value) -> Result<Artifact, ToolError>;

    /// Releases held resources (close clients, drop credentials)
    async fn shutdown(&mut self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Tool metadata for framework introspection
#[derive(Debug, Clone)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Registry holding named tools and enforcing schema validation on dispatch
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under the name from its description
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.describe().name;
        self.tools.insert(name, tool);
    }

    /// Initialize every registered tool with its configuration section
    pub async fn initialize(
        &mut self,
        tool_configs: &HashMap<String, Value>,
    ) -> Result<(), ToolError> {
        for (name, tool) in &mut self.tools {
            tool.initialize(tool_configs.get(name)).await?;
        }
        Ok(())
    }

    /// Get tool description
    pub fn describe_tool(&self, tool_name: &str) -> Option<ToolDescription> {
        self.tools.get(tool_name).map(|tool| tool.describe())
    }

    /// Execute tool after validating parameters against its schema
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &Value,
    ) -> Result<Artifact, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        self.validate_parameters(tool_name, parameters)?;

        tool.execute(parameters).await
    }

    /// Validate parameters against the tool's declared schema
    fn validate_parameters(&self, tool_name: &str, parameters: &Value) -> Result<(), ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        let description = tool.describe();
        let validator = jsonschema::validator_for(&description.parameters)
            .map_err(|e| ToolError::SchemaError(format!("Schema compilation error: {e}")))?;

        validator.validate(parameters).map_err(|errors| {
            let error_messages: Vec<String> = errors
                .map(|e| format!("At '{}': {}", e.instance_path, e))
                .collect();
            ToolError::ValidationError(error_messages.join("; "))
        })
    }

    /// Get list of registered tool names
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Shutdown all tools
    pub async fn shutdown(&mut self) -> Result<(), ToolError> {
        for tool in self.tools.values_mut() {
            tool.shutdown().await?;
        }
        Ok(())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool system errors: caller bugs and framework wiring failures only.
/// External service failures are reported through error artifacts instead.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool initialization failed: {0}")]
    InitializationError(String),
    #[error("Parameter validation failed: {0}")]
    ValidationError(String),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
    #[error("Tool shutdown failed: {0}")]
    ShutdownError(String),
}
