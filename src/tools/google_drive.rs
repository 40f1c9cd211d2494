//! Google Drive tool
//!
//! Adapter over an injected [`DriveHubBuilder`]. Every operation builds a
//! fresh authenticated hub first, so credential problems always surface at
//! that single point, then performs one Drive round trip. Expected failures
//! come back as error artifacts with fixed, operation-specific prefixes.

use crate::artifact::Artifact;
use crate::drive::{DriveFile, DriveHub, DriveHubBuilder, HttpDriveHubBuilder, SearchMode};
use crate::tools::{Tool, ToolDescription, ToolError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Parameters for `list_files`
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesRequest {
    pub folder_path: String,
}

/// Parameters for `save_content_to_drive`
#[derive(Debug, Clone, Deserialize)]
pub struct SaveContentRequest {
    pub path: String,
    pub content: String,
}

/// Parameters for `download_files`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadFilesRequest {
    pub file_paths: Vec<String>,
}

/// Parameters for `search_files`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFilesRequest {
    #[serde(default = "default_search_mode")]
    pub search_mode: SearchMode,
    pub file_name: String,
}

fn default_search_mode() -> SearchMode {
    SearchMode::Name
}

/// Google Drive tool delegating to a hub built per operation
pub struct GoogleDriveTool {
    owner_email: String,
    credentials: Value,
    builder: Arc<dyn DriveHubBuilder>,
    propagate_build_errors: bool,
}

impl GoogleDriveTool {
    /// Create a tool using the HTTP Drive hub
    pub fn new(owner_email: impl Into<String>, credentials: Value) -> Self {
        Self::with_builder(owner_email, credentials, Arc::new(HttpDriveHubBuilder::new()))
    }

    /// Create a tool with an injected hub builder
    pub fn with_builder(
        owner_email: impl Into<String>,
        credentials: Value,
        builder: Arc<dyn DriveHubBuilder>,
    ) -> Self {
        Self {
            owner_email: owner_email.into(),
            credentials,
            builder,
            propagate_build_errors: false,
        }
    }

    /// Preserve the legacy behavior where `download_files` propagates hub
    /// construction errors to the caller instead of wrapping them into an
    /// error artifact.
    pub fn propagate_build_errors(mut self, propagate: bool) -> Self {
        self.propagate_build_errors = propagate;
        self
    }

    /// Build an authenticated hub, the single credential failure point
    async fn build_hub(&self) -> Result<Box<dyn DriveHub>, crate::drive::DriveError> {
        self.builder
            .build(&self.owner_email, &self.credentials)
            .await
    }

    /// List files directly under a folder path
    pub async fn list_files(&self, request: ListFilesRequest) -> Result<Artifact, ToolError> {
        let hub = match self.build_hub().await {
            Ok(hub) => hub,
            Err(e) => {
                return Ok(Artifact::error(format!(
                    "error retrieving files from Google Drive: {e}"
                )))
            }
        };

        match hub.list_folder(&request.folder_path).await {
            Ok(files) => {
                tracing::debug!(folder_path = %request.folder_path, count = files.len(), "listed Drive folder");
                Ok(Artifact::list(
                    files.into_iter().map(DriveFile::into_value).collect(),
                ))
            }
            Err(e) => Ok(Artifact::error(format!(
                "error retrieving files from Google Drive: {e}"
            ))),
        }
    }

    /// Write content to a file path, creating missing parent folders
    pub async fn save_content_to_drive(
        &self,
        request: SaveContentRequest,
    ) -> Result<Artifact, ToolError> {
        let hub = match self.build_hub().await {
            Ok(hub) => hub,
            Err(e) => {
                return Ok(Artifact::error(format!(
                    "error saving file to Google Drive: {e}"
                )))
            }
        };

        match hub.upload(&request.path, request.content.as_bytes()).await {
            Ok(file) => {
                tracing::debug!(path = %request.path, file_id = %file.id, "saved file to Drive");
                Ok(Artifact::list(vec![file.into_value()]))
            }
            Err(e) => Ok(Artifact::error(format!(
                "error saving file to Google Drive: {e}"
            ))),
        }
    }

    /// Download the contents of files by path.
    ///
    /// With `propagate_build_errors` set, hub construction failures are
    /// returned as `Err` instead of an error artifact; every other failure
    /// is wrapped like the remaining operations.
    pub async fn download_files(
        &self,
        request: DownloadFilesRequest,
    ) -> Result<Artifact, ToolError> {
        let hub = match self.build_hub().await {
            Ok(hub) => hub,
            Err(e) if self.propagate_build_errors => {
                return Err(ToolError::ExecutionError(e.to_string()))
            }
            Err(e) => {
                return Ok(Artifact::error(format!(
                    "error downloading files from Google Drive: {e}"
                )))
            }
        };

        let mut items = Vec::with_capacity(request.file_paths.len());
        for file_path in &request.file_paths {
            match hub.download(file_path).await {
                Ok(bytes) => items.push(json!({
                    "path": file_path,
                    "content": BASE64.encode(&bytes),
                })),
                Err(e) => {
                    return Ok(Artifact::error(format!(
                        "error downloading files from Google Drive: {e}"
                    )))
                }
            }
        }

        tracing::debug!(count = items.len(), "downloaded files from Drive");
        Ok(Artifact::list(items))
    }

    /// Search for files by name or content
    pub async fn search_files(&self, request: SearchFilesRequest) -> Result<Artifact, ToolError> {
        let hub = match self.build_hub().await {
            Ok(hub) => hub,
            Err(e) if e.is_credential_error() => {
                return Ok(Artifact::error(format!(
                    "error searching for file due to malformed credentials: {e}"
                )))
            }
            Err(e) => {
                return Ok(Artifact::error(format!(
                    "error searching for files in Google Drive: {e}"
                )))
            }
        };

        match hub.search(request.search_mode, &request.file_name).await {
            Ok(files) => {
                tracing::debug!(file_name = %request.file_name, count = files.len(), "searched Drive");
                Ok(Artifact::list(
                    files.into_iter().map(DriveFile::into_value).collect(),
                ))
            }
            Err(e) => Ok(Artifact::error(format!(
                "error searching for files in Google Drive: {e}"
            ))),
        }
    }
}

#[async_trait]
impl Tool for GoogleDriveTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: "google_drive".to_string(),
            description: "List, save, download, and search files in Google Drive".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "operation": {
                        "type": "string",
                        "enum": [
                            "list_files",
                            "save_content_to_drive",
                            "download_files",
                            "search_files"
                        ]
                    },
                    "folder_path": {
                        "type": "string",
                        "description": "Slash-separated folder path, or 'root' for the Drive root"
                    },
                    "path": {
                        "type": "string",
                        "description": "Slash-separated destination file path"
                    },
                    "content": {
                        "type": "string"
                    },
                    "file_paths": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1
                    },
                    "search_mode": {
                        "type": "string",
                        "enum": ["name", "content"],
                        "default": "name"
                    },
                    "file_name": {
                        "type": "string"
                    }
                },
                "required": ["operation"],
                "allOf": [
                    {
                        "if": { "properties": { "operation": { "const": "list_files" } } },
                        "then": { "required": ["folder_path"] }
                    },
                    {
                        "if": { "properties": { "operation": { "const": "save_content_to_drive" } } },
                        "then": { "required": ["path", "content"] }
                    },
                    {
                        "if": { "properties": { "operation": { "const": "download_files" } } },
                        "then": { "required": ["file_paths"] }
                    },
                    {
                        "if": { "properties": { "operation": { "const": "search_files" } } },
                        "then": { "required": ["file_name"] }
                    }
                ],
                "additionalProperties": false
            }),
        }
    }

    async fn initialize(&mut self, _config: Option<&Value>) -> Result<(), ToolError> {
        Ok(())
    }

    async fn execute(&self, parameters: &Value) -> Result<Artifact, ToolError> {
        let operation = parameters
            .get("operation")
            .and_then(|o| o.as_str())
            .ok_or_else(|| {
                ToolError::InvalidParameters("operation parameter is required".to_string())
            })?;

        match operation {
            "list_files" => {
                let request = parse_request::<ListFilesRequest>(parameters)?;
                self.list_files(request).await
            }
            "save_content_to_drive" => {
                let request = parse_request::<SaveContentRequest>(parameters)?;
                self.save_content_to_drive(request).await
            }
            "download_files" => {
                let request = parse_request::<DownloadFilesRequest>(parameters)?;
                self.download_files(request).await
            }
            "search_files" => {
                let request = parse_request::<SearchFilesRequest>(parameters)?;
                self.search_files(request).await
            }
            other => Err(ToolError::InvalidParameters(format!(
                "unknown operation: {other}"
            ))),
        }
    }

    async fn shutdown(&mut self) -> Result<(), ToolError> {
        // Drop credential material eagerly
        self.credentials = Value::Null;
        Ok(())
    }
}

fn parse_request<T: serde::de::DeserializeOwned>(parameters: &Value) -> Result<T, ToolError> {
    serde_json::from_value(parameters.clone())
        .map_err(|e| ToolError::InvalidParameters(e.to_string()))
}
