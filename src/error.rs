//! Error types for the Octodrop server

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::BackendError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// Only the validation variants are client errors. Everything else is
/// reported as a 500 carrying the error's own message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required parameters: repoOwner, repoName, or token")]
    MissingParameters,

    #[error("Invalid request method. Only POST is supported.")]
    MethodNotAllowed,

    #[error(transparent)]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Missing form field: file")]
    MissingFile,

    #[error("Form field 'file' has no filename")]
    MissingFileName,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameters => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
    pub code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Upload failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Rejected upload request");
        }

        let body = Json(ErrorResponse {
            msg: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
