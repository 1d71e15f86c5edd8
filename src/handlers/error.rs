//! Error-to-response mapping for the JSON API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codepad_core::{FileStoreError, ProjectError, SecretError};
use serde_json::json;
use tracing::error;

/// A hard API failure: a status code plus a message for the `{"error": …}`
/// envelope. Path rejections map to 403, missing targets to 404, create
/// conflicts to 400; everything else is a 500.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<FileStoreError> for ApiError {
    fn from(error: FileStoreError) -> Self {
        match error {
            FileStoreError::InvalidPath(_) => {
                Self::new(StatusCode::FORBIDDEN, "Invalid file path")
            }
            FileStoreError::NotFound => Self::not_found("File not found"),
            FileStoreError::AlreadyExists => {
                Self::new(StatusCode::BAD_REQUEST, "File already exists")
            }
            FileStoreError::Io(error) => Self::internal(error.to_string()),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(error: ProjectError) -> Self {
        match error {
            ProjectError::InvalidName(_) => {
                Self::new(StatusCode::FORBIDDEN, "Invalid project name")
            }
            ProjectError::NotFound => Self::not_found("Project not found"),
            ProjectError::AlreadyExists => {
                Self::new(StatusCode::BAD_REQUEST, "Project already exists")
            }
            ProjectError::Io(error) => Self::internal(error.to_string()),
        }
    }
}

impl From<SecretError> for ApiError {
    fn from(error: SecretError) -> Self {
        match error {
            SecretError::InvalidProject(_) => {
                Self::new(StatusCode::FORBIDDEN, "Invalid project name")
            }
            SecretError::NotFound => Self::not_found("Secret not found"),
            SecretError::Io(error) => Self::internal(error.to_string()),
            SecretError::Malformed(error) => Self::internal(error.to_string()),
        }
    }
}
