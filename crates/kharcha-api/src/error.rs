//! Error types for kharcha-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kharcha_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidAmount { .. } | CoreError::InvalidDateTime { .. } => {
                ApiError::BadRequest {
                    message: err.to_string(),
                }
            }
            CoreError::EntryNotFound { index } => ApiError::NotFound {
                resource: format!("transaction at position {}", index),
            },
            CoreError::Store(e) => {
                log::error!("Store error: {}", e);
                ApiError::InternalError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
