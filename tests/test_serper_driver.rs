//! Integration tests for the Serper-backed search driver
//!
//! Tests behavioral contracts against a mock HTTP server: request shape,
//! result mapping, and error translation through the web search tool.

use agentools::drivers::{SerperDriver, WebSearchDriver};
use agentools::tools::WebSearchTool;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_driver(server: &MockServer) -> SerperDriver {
    SerperDriver::new("test-api-key")
        .expect("client builds")
        .with_endpoint(format!("{}/search", server.uri()))
}

#[tokio::test]
async fn test_search_sends_api_key_and_maps_results() {
    let mock_server = MockServer::start().await;

    let response_body = json!({
        "organic": [
            {
                "title": "Rust Programming Language",
                "link": "https://www.rust-lang.org",
                "snippet": "A language empowering everyone"
            },
            {
                "title": "Rust Book",
                "link": "https://doc.rust-lang.org/book",
                "snippet": "The Rust Programming Language book"
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "test-api-key"))
        .and(body_partial_json(json!({"q": "rust"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
        .mount(&mock_server)
        .await;

    let driver = test_driver(&mock_server);
    let items = driver.search("rust").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Rust Programming Language");
    assert_eq!(items[0]["url"], "https://www.rust-lang.org");
    assert_eq!(items[1]["description"], "The Rust Programming Language book");
}

#[tokio::test]
async fn test_api_error_includes_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let driver = test_driver(&mock_server);
    let err = driver.search("rust").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("429"));
    assert!(msg.contains("quota exceeded"));
}

#[tokio::test]
async fn test_malformed_response_is_invalid_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let driver = test_driver(&mock_server);
    let err = driver.search("rust").await.unwrap_err();

    assert!(err.to_string().contains("invalid response"));
}

#[tokio::test]
async fn test_tool_wraps_driver_failure_with_driver_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&mock_server)
        .await;

    let tool = WebSearchTool::new(Arc::new(test_driver(&mock_server)));
    let artifact = tool.search("anything").await.unwrap();

    let msg = artifact.as_error().unwrap();
    assert!(msg.contains("Error searching 'anything' with SerperDriver"));
    assert!(msg.contains("backend down"));
}

#[tokio::test]
async fn test_results_count_caps_returned_items() {
    let mock_server = MockServer::start().await;

    let organic: Vec<_> = (0..10)
        .map(|i| {
            json!({
                "title": format!("Result {i}"),
                "link": format!("https://example.com/{i}")
            })
        })
        .collect();

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic": organic})))
        .mount(&mock_server)
        .await;

    let driver = test_driver(&mock_server).with_results_count(3);
    let items = driver.search("rust").await.unwrap();

    assert_eq!(items.len(), 3);
}
