use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;

/// Field name → human readable message, as sent back to the client.
pub type FieldErrors = BTreeMap<String, String>;

/// Every failure a request can end in. Rendered to JSON by `IntoResponse`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("invalid id")]
    InvalidId,

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), message.into());
        Self::Validation(errors)
    }

    pub fn invalid_credentials() -> Self {
        Self::Auth("Invalid credentials".into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                Self::Conflict(format!("Duplicate value for {field}"))
            }
            StoreError::Rejected(message) => Self::validation("store", message),
            StoreError::NotFound => Self::NotFound("Resource not found".into()),
            StoreError::Backend(e) => Self::Internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Validation(errors) => json!({
                "message": "Validation error",
                "errors": errors,
            }),
            Self::InvalidId => json!({ "message": "Invalid id" }),
            Self::Auth(message) | Self::Conflict(message) | Self::NotFound(message) => {
                json!({ "message": message })
            }
            Self::Config(detail) => {
                error!(%detail, "server misconfigured");
                json!({ "message": "Server configuration error" })
            }
            Self::Internal(e) => {
                error!(error = ?e, "unhandled error");
                json!({ "message": "Server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
