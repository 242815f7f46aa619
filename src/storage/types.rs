//! Storage types

use axum::{
    body::Body,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine;
use serde::Serialize;

use super::path::StoredObjectLocation;
use crate::hashing::ContentHashes;

/// Branch every upload is committed to
pub const DEFAULT_BRANCH: &str = "main";

/// Repository an upload is written into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
}

/// Caller-supplied values forwarded to the backend untouched
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// A create-or-update write against the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendWriteRequest {
    pub full_path: String,
    pub commit_message: String,
    pub base64_content: String,
    /// Blob id the backend matches against for a conditional update
    pub object_hash: Option<String>,
    pub branch: String,
}

impl BackendWriteRequest {
    pub fn new(
        location: &StoredObjectLocation,
        original_name: &str,
        content: &[u8],
        hashes: &ContentHashes,
    ) -> Self {
        Self {
            full_path: location.full_path(),
            commit_message: format!("Upload {}", original_name),
            base64_content: base64::engine::general_purpose::STANDARD.encode(content),
            object_hash: Some(hashes.object_hash.clone()),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// JSON body sent to the backend
    pub fn payload(&self) -> ContentsPayload<'_> {
        ContentsPayload {
            message: &self.commit_message,
            content: &self.base64_content,
            sha: self.object_hash.as_deref(),
            branch: &self.branch,
        }
    }
}

/// Wire format of a contents write
#[derive(Debug, Serialize)]
pub struct ContentsPayload<'a> {
    pub message: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
    pub branch: &'a str,
}

/// Raw backend response, relayed to the caller as-is
#[derive(Debug)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

impl IntoResponse for BackendResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.status;

        let mut headers = self.headers;
        // Framing belongs to the upstream connection, hyper sets its own
        headers.remove(header::TRANSFER_ENCODING);
        headers.remove(header::CONNECTION);
        *response.headers_mut() = headers;

        response
    }
}

/// Backend client errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_request_from_upload() {
        let content = b"hello\n";
        let hashes = ContentHashes::compute(content);
        let location = StoredObjectLocation::build("img", &hashes.dedup_hash, "hi.txt");

        let write = BackendWriteRequest::new(&location, "hi.txt", content, &hashes);

        assert_eq!(write.full_path, format!("img/{}.txt", hashes.dedup_hash));
        assert_eq!(write.commit_message, "Upload hi.txt");
        assert_eq!(write.base64_content, "aGVsbG8K");
        assert_eq!(write.object_hash.as_deref(), Some(hashes.object_hash.as_str()));
        assert_eq!(write.branch, "main");
    }

    #[test]
    fn test_payload_fields() {
        let hashes = ContentHashes::compute(b"");
        let location = StoredObjectLocation::build("", &hashes.dedup_hash, "empty");
        let mut write = BackendWriteRequest::new(&location, "empty", b"", &hashes);

        let json = serde_json::to_value(write.payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Upload empty",
                "content": "",
                "sha": "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391",
                "branch": "main",
            })
        );

        write.object_hash = None;
        let json = serde_json::to_value(write.payload()).unwrap();
        assert!(json.get("sha").is_none());
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let credentials = Credentials {
            token: "ghp_secret".to_string(),
            user_agent: Some("curl/8.0".to_string()),
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("curl/8.0"));
    }

    #[test]
    fn test_relay_keeps_status_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-github-request-id", "ABC".parse().unwrap());
        headers.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());

        let response = BackendResponse {
            status: StatusCode::CONFLICT,
            headers,
            body: Body::from("{}"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()["x-github-request-id"], "ABC");
        assert!(response.headers().get(header::TRANSFER_ENCODING).is_none());
    }
}
