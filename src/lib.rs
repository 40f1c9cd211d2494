//! agentools - Web search and Google Drive tool adapters
//!
//! Thin, capability-injected tool adapters for agent frameworks:
//! - A web search tool delegating to a pluggable [`drivers::WebSearchDriver`]
//! - A Google Drive tool delegating to a [`drive::DriveHubBuilder`]
//!
//! Both return the framework's uniform [`artifact::Artifact`] shape: a list
//! of result items on success, a human-readable error artifact on any
//! expected external failure. `Err(ToolError)` is reserved for caller bugs
//! such as schema violations.
//!
//! # Quick Start
//!
//! ```rust
//! use agentools::artifact::Artifact;
//! use agentools::drivers::{DriverError, WebSearchDriver};
//! use agentools::tools::WebSearchTool;
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct FixedDriver;
//!
//! #[async_trait]
//! impl WebSearchDriver for FixedDriver {
//!     fn name(&self) -> &str {
//!         "FixedDriver"
//!     }
//!
//!     async fn search(&self, _query: &str) -> Result<Vec<Value>, DriverError> {
//!         Ok(vec![json!({"title": "Example", "url": "https://example.com"})])
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let tool = WebSearchTool::new(Arc::new(FixedDriver));
//! let artifact = tool.search("best pizza").await.unwrap();
//! assert_eq!(artifact.as_list().unwrap().len(), 1);
//! # });
//! ```

pub mod artifact;
pub mod config;
pub mod drive;
pub mod drivers;
pub mod logging;
pub mod tools;

pub use artifact::{Artifact, ErrorArtifact, ListArtifact};
pub use config::{registry_from_config, ConfigError, ToolsConfig};
pub use tools::{GoogleDriveTool, Tool, ToolDescription, ToolError, ToolRegistry, WebSearchTool};
