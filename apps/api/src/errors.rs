use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "detail": "<message>" }`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Body could not be read as the endpoint's top-level request shape.
    #[error("{0}")]
    BadRequest(#[from] JsonRejection),

    /// A pricing section is missing a required key or carries the wrong type.
    /// Reported as 500, matching the deployed frontend's expectations.
    #[error("{0}")]
    InvalidSection(String),

    /// Any failure of the completion provider. Callers never see the sub-cause.
    #[error("{0}")]
    Llm(String),
}

impl AppError {
    /// Logs a provider failure for `operation` and wraps its message for the caller.
    pub fn llm(operation: &str, err: LlmError) -> Self {
        tracing::error!("Error in {operation}: {err}");
        AppError::Llm(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(rejection) => rejection.status(),
            AppError::InvalidSection(_) | AppError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::BadRequest(rejection) => rejection.body_text(),
            AppError::InvalidSection(msg) | AppError::Llm(msg) => msg.clone(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
