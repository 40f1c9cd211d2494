//! TOML configuration for wiring concrete tools
//!
//! The adapters themselves take injected capabilities; this module covers the
//! common deployment where both tools are assembled from a config file, with
//! secrets resolved from the environment and the filesystem at build time.

use crate::drivers::SerperDriver;
use crate::tools::{GoogleDriveTool, ToolRegistry, WebSearchTool};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Top-level tools configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    pub web_search: Option<WebSearchSection>,
    pub google_drive: Option<GoogleDriveSection>,
}

/// Web search tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebSearchSection {
    /// Environment variable containing the Serper API key
    pub api_key_env: String,
    /// Optional endpoint override
    pub endpoint: Option<String>,
    #[serde(default = "default_results_count")]
    pub results_count: usize,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_results_count() -> usize {
    5
}

fn default_country() -> String {
    "us".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Google Drive tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleDriveSection {
    /// Drive account to impersonate
    pub owner_email: String,
    /// Path to the service-account JSON key file
    pub credentials_file: String,
    /// Legacy behavior: propagate hub-build errors from download_files
    #[serde(default)]
    pub propagate_build_errors: bool,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ToolsConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ToolsConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Build a registry containing every tool the configuration enables
pub fn registry_from_config(config: &ToolsConfig) -> Result<ToolRegistry, ConfigError> {
    let mut registry = ToolRegistry::new();

    if let Some(section) = &config.web_search {
        let api_key = std::env::var(&section.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(section.api_key_env.clone()))?;

        let mut driver = SerperDriver::new(api_key)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?
            .with_results_count(section.results_count)
            .with_locale(section.country.clone(), section.language.clone());
        if let Some(endpoint) = &section.endpoint {
            driver = driver.with_endpoint(endpoint.clone());
        }

        registry.register(Box::new(WebSearchTool::new(Arc::new(driver))));
    }

    if let Some(section) = &config.google_drive {
        let raw = std::fs::read_to_string(&section.credentials_file)?;
        let credentials: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::InvalidConfig(format!("invalid service account key file: {e}"))
        })?;

        let tool = GoogleDriveTool::new(section.owner_email.clone(), credentials)
            .propagate_build_errors(section.propagate_build_errors);
        registry.register(Box::new(tool));
    }

    Ok(registry)
}
