//! Uniform artifact types for tool output
//!
//! Every tool operation resolves to one of two shapes: an ordered list of
//! result items, or a human-readable error message. The invoking framework
//! never has to catch adapter errors; expected failures come back as an
//! error artifact.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum length of an error artifact message before truncation
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Ordered sequence of result items produced by a successful tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListArtifact {
    pub items: Vec<Value>,
}

impl ListArtifact {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Error result carrying a human-readable message, no structured codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorArtifact {
    pub value: String,
}

impl ErrorArtifact {
    /// Build an error artifact, sanitizing the message so credential
    /// material from underlying clients cannot leak to the framework.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            value: sanitize_error_message(&message.into()),
        }
    }
}

/// Tool output wrapper: either a list of results or an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Artifact {
    List(ListArtifact),
    Error(ErrorArtifact),
}

impl Artifact {
    /// Create a list artifact from result items
    pub fn list(items: Vec<Value>) -> Self {
        Artifact::List(ListArtifact::new(items))
    }

    /// Create an error artifact with a sanitized message
    pub fn error<S: Into<String>>(message: S) -> Self {
        Artifact::Error(ErrorArtifact::new(message))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Artifact::Error(_))
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Artifact::List(list) => Some(&list.items),
            Artifact::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Artifact::Error(err) => Some(&err.value),
            Artifact::List(_) => None,
        }
    }
}

static SECRET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+").unwrap());

static SENSITIVE_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+").unwrap()
});

/// Sanitize error messages to prevent sensitive data leakage
fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = SECRET_PATTERN.replace_all(message, "${1}=***").to_string();

    sanitized = SENSITIVE_PATH_PATTERN
        .replace_all(&sanitized, "/***REDACTED***/")
        .to_string();

    // Truncate very long messages - ensure total length is <= 500
    if sanitized.len() > MAX_ERROR_MESSAGE_LEN {
        let truncate_suffix = "...[truncated]";
        let max_content_len = MAX_ERROR_MESSAGE_LEN - truncate_suffix.len();
        let mut cut = max_content_len;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized = format!("{}{}", &sanitized[..cut], truncate_suffix);
    }

    sanitized
}
