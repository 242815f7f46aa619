//! GitHub contents API client
//!
//! Writes a file with `PUT /repos/{owner}/{repo}/contents/{path}`. The
//! response is never interpreted; status, headers and body go straight back
//! to the caller.

use async_trait::async_trait;
use axum::body::Body;
use reqwest::header;

use super::types::{BackendError, BackendResponse, BackendWriteRequest, Credentials, RepoTarget};

/// Media type selecting the structured JSON response format
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Content repository backend
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Issue a single create-or-update write and return the raw response.
    async fn put_contents(
        &self,
        repo: &RepoTarget,
        write: &BackendWriteRequest,
        credentials: &Credentials,
    ) -> Result<BackendResponse, BackendError>;
}

/// Contents API client backed by reqwest
#[derive(Clone)]
pub struct GithubContentsClient {
    client: reqwest::Client,
    api_url: String,
    default_user_agent: String,
}

impl GithubContentsClient {
    pub fn new(api_url: &str, default_user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            default_user_agent: default_user_agent.to_string(),
        }
    }

    /// Contents URL for a repository-relative path that is already encoded
    pub fn contents_url(&self, repo: &RepoTarget, full_path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.name),
            full_path
        )
    }
}

#[async_trait]
impl ContentBackend for GithubContentsClient {
    #[tracing::instrument(skip_all, fields(owner = %repo.owner, repo = %repo.name, path = %write.full_path))]
    async fn put_contents(
        &self,
        repo: &RepoTarget,
        write: &BackendWriteRequest,
        credentials: &Credentials,
    ) -> Result<BackendResponse, BackendError> {
        let url = self.contents_url(repo, &write.full_path);
        let user_agent = credentials
            .user_agent
            .as_deref()
            .unwrap_or(&self.default_user_agent);

        tracing::debug!(
            url = %url,
            content_len = write.base64_content.len(),
            "Sending contents write"
        );

        let response = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", credentials.token))
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .json(&write.payload())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Contents write failed");
                e
            })?;

        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(status = status.as_u16(), "Contents write completed");

        Ok(BackendResponse {
            status,
            headers,
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}
