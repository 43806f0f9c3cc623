use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` extractor whose rejections render as `{ "detail": ... }` like every
/// other error the API returns.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
