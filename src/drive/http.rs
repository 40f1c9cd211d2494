//! HTTP implementation of the Drive hub over the Drive REST v3 API
//!
//! Slash-separated paths are resolved segment by segment with `files.list`
//! queries. Uploads are two requests: create the metadata, then patch the
//! content with `uploadType=media`.

use crate::drive::auth::{fetch_access_token, ServiceAccountCredentials};
use crate::drive::{DriveError, DriveFile, DriveHub, DriveHubBuilder, SearchMode};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
const FILE_FIELDS: &str = "files(id,name,mimeType,modifiedTime)";

#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Authenticated Drive client for a single adapter call
pub struct HttpDriveHub {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpDriveHub {
    pub fn new(client: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    /// Escape a name for use inside a Drive `q` string literal (pure function)
    fn escape_query_value(name: &str) -> String {
        name.replace('\\', "\\\\").replace('\'', "\\'")
    }

    async fn files_list(&self, query: &str) -> Result<Vec<DriveFile>, DriveError> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("q", query), ("fields", FILE_FIELDS)])
            .send()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let list: FileListResponse = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(e.to_string()))?;

        Ok(list.files)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            401 | 403 => Err(DriveError::Auth(detail)),
            404 => Err(DriveError::NotFound(detail)),
            code => Err(DriveError::Api {
                status: code,
                detail,
            }),
        }
    }

    /// Resolve a slash-separated folder path to a folder id
    async fn resolve_folder_id(&self, folder_path: &str) -> Result<String, DriveError> {
        let mut parent = "root".to_string();

        for segment in Self::path_segments(folder_path) {
            let query = format!(
                "'{}' in parents and name = '{}' and mimeType = '{FOLDER_MIME_TYPE}' and trashed = false",
                Self::escape_query_value(&parent),
                Self::escape_query_value(segment),
            );
            let mut folders = self.files_list(&query).await?;
            match folders.drain(..).next() {
                Some(folder) => parent = folder.id,
                None => {
                    return Err(DriveError::NotFound(format!(
                        "folder '{segment}' not found in path '{folder_path}'"
                    )))
                }
            };
        }

        Ok(parent)
    }

    /// Resolve a slash-separated file path to its metadata
    async fn resolve_file(&self, file_path: &str) -> Result<DriveFile, DriveError> {
        let (folder_path, file_name) = Self::split_file_path(file_path);
        let parent_id = self.resolve_folder_id(folder_path).await?;

        let query = format!(
            "'{}' in parents and name = '{}' and trashed = false",
            Self::escape_query_value(&parent_id),
            Self::escape_query_value(file_name),
        );
        let mut files = self.files_list(&query).await?;
        let file = files
            .drain(..)
            .next()
            .ok_or_else(|| DriveError::NotFound(format!("file '{file_path}' not found")));
        file
    }

    /// Create a folder under a parent, returning its id
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, DriveError> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(e.to_string()))?;

        Ok(file.id)
    }

    /// Resolve a folder path, creating any missing segments
    async fn ensure_folder_id(&self, folder_path: &str) -> Result<String, DriveError> {
        let mut parent = "root".to_string();

        for segment in Self::path_segments(folder_path) {
            let query = format!(
                "'{}' in parents and name = '{}' and mimeType = '{FOLDER_MIME_TYPE}' and trashed = false",
                Self::escape_query_value(&parent),
                Self::escape_query_value(segment),
            );
            let mut folders = self.files_list(&query).await?;
            parent = match folders.drain(..).next() {
                Some(folder) => folder.id,
                None => self.create_folder(segment, &parent).await?,
            };
        }

        Ok(parent)
    }

    /// Best-effort delete used to clean up after a failed content upload
    async fn delete_file(&self, file_id: &str) {
        let url = format!("{}/drive/v3/files/{}", self.base_url, file_id);
        match self.client.delete(&url).bearer_auth(&self.token).send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(
                    file_id,
                    status = response.status().as_u16(),
                    "failed to clean up partial upload"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(file_id, error = %e, "failed to clean up partial upload");
            }
        }
    }

    /// Split "a/b/file.txt" into folder path "a/b" and file name "file.txt"
    /// (pure function)
    fn split_file_path(file_path: &str) -> (&str, &str) {
        match file_path.rsplit_once('/') {
            Some((folder, name)) => (folder, name),
            None => ("root", file_path),
        }
    }

    /// Meaningful path segments, treating "root", "" and "/" as the Drive
    /// root (pure function)
    fn path_segments(folder_path: &str) -> impl Iterator<Item = &str> {
        folder_path
            .split('/')
            .filter(|s| !s.is_empty() && *s != "root")
    }
}

#[async_trait]
impl DriveHub for HttpDriveHub {
    async fn list_folder(&self, folder_path: &str) -> Result<Vec<DriveFile>, DriveError> {
        let folder_id = self.resolve_folder_id(folder_path).await?;
        let query = format!(
            "'{}' in parents and trashed = false",
            Self::escape_query_value(&folder_id)
        );
        self.files_list(&query).await
    }

    async fn upload(&self, path: &str, content: &[u8]) -> Result<DriveFile, DriveError> {
        let (folder_path, file_name) = Self::split_file_path(path);
        let parent_id = self.ensure_folder_id(folder_path).await?;

        // Create metadata first, then patch the content in
        let create_url = format!("{}/drive/v3/files", self.base_url);
        let body = json!({
            "name": file_name,
            "parents": [parent_id]
        });

        let response = self
            .client
            .post(&create_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(e.to_string()))?;

        let media_url = format!(
            "{}/upload/drive/v3/files/{}?uploadType=media",
            self.base_url, file.id
        );
        let patched = async {
            let response = self
                .client
                .patch(&media_url)
                .bearer_auth(&self.token)
                .body(content.to_vec())
                .send()
                .await
                .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

            let response = Self::check_status(response).await?;
            response
                .json::<DriveFile>()
                .await
                .map_err(|e| DriveError::InvalidResponse(e.to_string()))
        }
        .await;

        match patched {
            Ok(file) => Ok(file),
            Err(e) => {
                // Remove the metadata-only file so a failed upload leaves
                // nothing behind
                self.delete_file(&file.id).await;
                Err(e)
            }
        }
    }

    async fn download(&self, file_path: &str) -> Result<Vec<u8>, DriveError> {
        let file = self.resolve_file(file_path).await?;

        let url = format!("{}/drive/v3/files/{}", self.base_url, file.id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn search(
        &self,
        mode: SearchMode,
        file_name: &str,
    ) -> Result<Vec<DriveFile>, DriveError> {
        let escaped = Self::escape_query_value(file_name);
        let query = match mode {
            SearchMode::Name => format!("name contains '{escaped}' and trashed = false"),
            SearchMode::Content => format!("fullText contains '{escaped}' and trashed = false"),
        };

        self.files_list(&query).await
    }
}

/// Builds [`HttpDriveHub`] instances: parses credentials, performs the
/// JWT-bearer token exchange impersonating the owner, and hands back an
/// authenticated hub.
pub struct HttpDriveHubBuilder {
    base_url: String,
}

impl HttpDriveHubBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL, used to point at a mock server in tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for HttpDriveHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriveHubBuilder for HttpDriveHubBuilder {
    async fn build(
        &self,
        owner_email: &str,
        credentials: &Value,
    ) -> Result<Box<dyn DriveHub>, DriveError> {
        let creds = ServiceAccountCredentials::from_value(credentials)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        tracing::debug!(owner_email, "building authenticated Drive hub");
        let token = fetch_access_token(&client, &creds, Some(owner_email)).await?;

        Ok(Box::new(HttpDriveHub::new(
            client,
            self.base_url.clone(),
            token,
        )))
    }
}
