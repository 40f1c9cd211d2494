//! Google Drive hub capability
//!
//! The Drive tool delegates every operation to a [`DriveHub`] built fresh
//! per call by a [`DriveHubBuilder`]. The builder owns credential handling,
//! so credential failures always surface at the build step rather than in
//! the middle of an operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod auth;
pub mod http;

pub use auth::ServiceAccountCredentials;
pub use http::{HttpDriveHub, HttpDriveHubBuilder};

/// Drive file metadata item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "modifiedTime", default)]
    pub modified_time: Option<String>,
}

impl DriveFile {
    /// Convert to the JSON item shape carried inside list artifacts
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// How `search` matches files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Match on the file name
    Name,
    /// Full-text match on file contents
    Content,
}

/// An authenticated Drive client for a single adapter call
#[async_trait]
pub trait DriveHub: Send + Sync {
    /// List files directly under a slash-separated folder path ("root" for
    /// the Drive root)
    async fn list_folder(&self, folder_path: &str) -> Result<Vec<DriveFile>, DriveError>;

    /// Write content to a slash-separated file path, creating missing parent
    /// folders
    async fn upload(&self, path: &str, content: &[u8]) -> Result<DriveFile, DriveError>;

    /// Download the content of the file at a slash-separated path
    async fn download(&self, file_path: &str) -> Result<Vec<u8>, DriveError>;

    /// Search for files by name or content
    async fn search(&self, mode: SearchMode, file_name: &str)
        -> Result<Vec<DriveFile>, DriveError>;
}

/// Builds an authenticated [`DriveHub`] from owner email plus service-account
/// credentials. Called before every tool operation.
#[async_trait]
pub trait DriveHubBuilder: Send + Sync {
    async fn build(
        &self,
        owner_email: &str,
        credentials: &Value,
    ) -> Result<Box<dyn DriveHub>, DriveError>;
}

/// Drive capability failures
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("malformed credentials: {0}")]
    MalformedCredentials(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("Drive API returned {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl DriveError {
    /// True when the failure stems from unusable credential material
    pub fn is_credential_error(&self) -> bool {
        matches!(self, DriveError::MalformedCredentials(_))
    }
}
