//! Upload Routes
//!
//! `POST /?repoOwner=..&repoName=..&path=..&token=..` with a multipart body
//! carrying a `file` field. The file is stored under a content-addressed name
//! and the backend's response is relayed verbatim.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Query, Request, State},
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use crate::error::{AppError, Result};
use crate::hashing::ContentHashes;
use crate::state::AppState;
use crate::storage::{BackendWriteRequest, Credentials, RepoTarget, StoredObjectLocation};

/// Name of the multipart field holding the upload
pub const FILE_FIELD: &str = "file";

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters of an upload
#[derive(Debug, Default)]
pub struct UploadParams {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub path: Option<String>,
    pub token: Option<String>,
}

/// Parameters after validation
#[derive(Debug)]
pub struct ValidatedParams {
    pub repo: RepoTarget,
    pub path: String,
    pub token: String,
}

impl UploadParams {
    /// Collect parameters from raw query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "repoOwner" => &mut params.repo_owner,
                "repoName" => &mut params.repo_name,
                "path" => &mut params.path,
                "token" => &mut params.token,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// Require owner, repository and token. Empty values count as missing.
    pub fn validate(self) -> Result<ValidatedParams> {
        let (Some(owner), Some(name), Some(token)) = (
            non_empty(self.repo_owner),
            non_empty(self.repo_name),
            non_empty(self.token),
        ) else {
            return Err(AppError::MissingParameters);
        };

        Ok(ValidatedParams {
            repo: RepoTarget { owner, name },
            path: self.path.unwrap_or_default(),
            token,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// File extracted from the multipart body
#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub content: Bytes,
}

// ============================================================================
// Router
// ============================================================================

/// Create the upload router
///
/// Every method is routed to the handler so that non-POST requests get the
/// JSON 405 envelope instead of axum's empty one.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", any(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate, hash, place and write an uploaded file.
///
/// Parameters and method are checked before the body is touched.
async fn upload(
    State(state): State<AppState>,
    method: Method,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response> {
    let params = UploadParams::from_pairs(pairs).validate()?;

    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let mut multipart = Multipart::from_request(request, &state).await?;
    let file = read_file_field(&mut multipart).await?;

    tracing::debug!(
        owner = %params.repo.owner,
        repo = %params.repo.name,
        file_name = %file.name,
        size = file.content.len(),
        "Received upload"
    );

    let hashes = ContentHashes::compute(&file.content);
    let location = StoredObjectLocation::build(&params.path, &hashes.dedup_hash, &file.name);
    let write = BackendWriteRequest::new(&location, &file.name, &file.content, &hashes);

    let credentials = Credentials {
        token: params.token,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let response = state
        .backend()
        .put_contents(&params.repo, &write, &credentials)
        .await?;

    tracing::info!(
        owner = %params.repo.owner,
        repo = %params.repo.name,
        path = %write.full_path,
        object_hash = %hashes.object_hash,
        status = response.status.as_u16(),
        "Relaying backend response"
    );

    Ok(response.into_response())
}

// ============================================================================
// Helpers
// ============================================================================

/// Find the `file` field and read it fully into memory
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or(AppError::MissingFileName)?;
        let content = field.bytes().await?;

        return Ok(UploadedFile { name, content });
    }

    Err(AppError::MissingFile)
}

// ============================================================================
// Tests
// ============================================================================
