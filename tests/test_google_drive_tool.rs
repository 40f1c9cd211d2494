//! Integration tests for the Google Drive tool
//!
//! Covers the adapter contract with injected hub builders: the fixed error
//! prefixes for each operation when credentials are unusable, both settings
//! of the download passthrough flag, the success paths through a fake hub,
//! and schema validation at the registry.

use agentools::drive::{DriveError, DriveFile, DriveHub, DriveHubBuilder, SearchMode};
use agentools::tools::{GoogleDriveTool, Tool, ToolError, ToolRegistry};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

struct MalformedCredentialsBuilder;

#[async_trait]
impl DriveHubBuilder for MalformedCredentialsBuilder {
    async fn build(
        &self,
        _owner_email: &str,
        _credentials: &Value,
    ) -> Result<Box<dyn DriveHub>, DriveError> {
        Err(DriveError::MalformedCredentials("mocked error".to_string()))
    }
}

/// In-memory hub serving a fixed folder listing and file contents
struct FakeHub;

#[async_trait]
impl DriveHub for FakeHub {
    async fn list_folder(&self, folder_path: &str) -> Result<Vec<DriveFile>, DriveError> {
        if folder_path == "missing" {
            return Err(DriveError::NotFound("folder 'missing' not found".to_string()));
        }
        Ok(vec![
            DriveFile {
                id: "f1".to_string(),
                name: "a.txt".to_string(),
                mime_type: Some("text/plain".to_string()),
                modified_time: None,
            },
            DriveFile {
                id: "f2".to_string(),
                name: "b.txt".to_string(),
                mime_type: Some("text/plain".to_string()),
                modified_time: None,
            },
        ])
    }

    async fn upload(&self, path: &str, _content: &[u8]) -> Result<DriveFile, DriveError> {
        Ok(DriveFile {
            id: "new1".to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            mime_type: Some("text/plain".to_string()),
            modified_time: None,
        })
    }

    async fn download(&self, file_path: &str) -> Result<Vec<u8>, DriveError> {
        if file_path.ends_with("missing.txt") {
            return Err(DriveError::NotFound(format!("file '{file_path}' not found")));
        }
        Ok(b"hello drive".to_vec())
    }

    async fn search(
        &self,
        _mode: SearchMode,
        file_name: &str,
    ) -> Result<Vec<DriveFile>, DriveError> {
        Ok(vec![DriveFile {
            id: "s1".to_string(),
            name: file_name.to_string(),
            mime_type: None,
            modified_time: None,
        }])
    }
}

struct FakeHubBuilder;

#[async_trait]
impl DriveHubBuilder for FakeHubBuilder {
    async fn build(
        &self,
        _owner_email: &str,
        _credentials: &Value,
    ) -> Result<Box<dyn DriveHub>, DriveError> {
        Ok(Box::new(FakeHub))
    }
}

fn failing_tool() -> GoogleDriveTool {
    GoogleDriveTool::with_builder(
        "tony@griptape.ai",
        json!({}),
        Arc::new(MalformedCredentialsBuilder),
    )
}

fn working_tool() -> GoogleDriveTool {
    GoogleDriveTool::with_builder("tony@griptape.ai", json!({}), Arc::new(FakeHubBuilder))
}

#[tokio::test]
async fn test_list_files_error_prefix_on_bad_credentials() {
    let artifact = failing_tool()
        .execute(&json!({"operation": "list_files", "folder_path": "root"}))
        .await
        .unwrap();

    assert!(artifact
        .as_error()
        .unwrap()
        .contains("error retrieving files from Google Drive"));
}

#[tokio::test]
async fn test_save_content_error_prefix_on_bad_credentials() {
    let artifact = failing_tool()
        .execute(&json!({
            "operation": "save_content_to_drive",
            "path": "/path/to/your/file.txt",
            "content": "Sample content for the file."
        }))
        .await
        .unwrap();

    assert!(artifact
        .as_error()
        .unwrap()
        .contains("error saving file to Google Drive"));
}

#[tokio::test]
async fn test_search_files_malformed_credentials_prefix() {
    let artifact = failing_tool()
        .execute(&json!({
            "operation": "search_files",
            "search_mode": "name",
            "file_name": "search_file_name.txt"
        }))
        .await
        .unwrap();

    assert!(artifact
        .as_error()
        .unwrap()
        .contains("error searching for file due to malformed credentials"));
}

#[tokio::test]
async fn test_download_files_wraps_build_error_by_default() {
    let artifact = failing_tool()
        .execute(&json!({
            "operation": "download_files",
            "file_paths": ["example_folder/example_file.txt"]
        }))
        .await
        .unwrap();

    assert!(artifact
        .as_error()
        .unwrap()
        .contains("error downloading files from Google Drive"));
}

#[tokio::test]
async fn test_download_files_propagates_build_error_when_flagged() {
    let tool = failing_tool().propagate_build_errors(true);

    let result = tool
        .execute(&json!({
            "operation": "download_files",
            "file_paths": ["example_folder/example_file.txt"]
        }))
        .await;

    match result {
        Err(ToolError::ExecutionError(msg)) => assert!(msg.contains("mocked error")),
        other => panic!("expected propagated error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_files_success_returns_metadata_items() {
    let artifact = working_tool()
        .execute(&json!({"operation": "list_files", "folder_path": "root"}))
        .await
        .unwrap();

    let items = artifact.as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "a.txt");
    assert_eq!(items[1]["id"], "f2");
}

#[tokio::test]
async fn test_list_files_missing_folder_is_wrapped() {
    let artifact = working_tool()
        .execute(&json!({"operation": "list_files", "folder_path": "missing"}))
        .await
        .unwrap();

    let msg = artifact.as_error().unwrap();
    assert!(msg.contains("error retrieving files from Google Drive"));
    assert!(msg.contains("missing"));
}

#[tokio::test]
async fn test_save_content_success_returns_created_file() {
    let artifact = working_tool()
        .execute(&json!({
            "operation": "save_content_to_drive",
            "path": "notes/todo.txt",
            "content": "buy milk"
        }))
        .await
        .unwrap();

    let items = artifact.as_list().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "todo.txt");
}

#[tokio::test]
async fn test_download_files_success_returns_encoded_content() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let artifact = working_tool()
        .execute(&json!({
            "operation": "download_files",
            "file_paths": ["docs/a.txt", "docs/b.txt"]
        }))
        .await
        .unwrap();

    let items = artifact.as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["path"], "docs/a.txt");

    let content = BASE64
        .decode(items[0]["content"].as_str().unwrap())
        .unwrap();
    assert_eq!(content, b"hello drive");
}

#[tokio::test]
async fn test_download_files_partial_failure_is_wrapped() {
    let artifact = working_tool()
        .execute(&json!({
            "operation": "download_files",
            "file_paths": ["docs/a.txt", "docs/missing.txt"]
        }))
        .await
        .unwrap();

    assert!(artifact
        .as_error()
        .unwrap()
        .contains("error downloading files from Google Drive"));
}

#[tokio::test]
async fn test_search_files_success() {
    let artifact = working_tool()
        .execute(&json!({
            "operation": "search_files",
            "file_name": "report.txt"
        }))
        .await
        .unwrap();

    let items = artifact.as_list().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "report.txt");
}

#[tokio::test]
async fn test_registry_enforces_operation_specific_required_fields() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(working_tool()));

    // list_files without folder_path is rejected before the tool runs
    let result = registry
        .execute_tool("google_drive", &json!({"operation": "list_files"}))
        .await;
    assert!(matches!(result, Err(ToolError::ValidationError(_))));

    // save without content is rejected
    let result = registry
        .execute_tool(
            "google_drive",
            &json!({"operation": "save_content_to_drive", "path": "a.txt"}),
        )
        .await;
    assert!(matches!(result, Err(ToolError::ValidationError(_))));

    // valid list call passes validation and succeeds
    let artifact = registry
        .execute_tool(
            "google_drive",
            &json!({"operation": "list_files", "folder_path": "root"}),
        )
        .await
        .unwrap();
    assert!(!artifact.is_error());
}
