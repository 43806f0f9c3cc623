use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness message for uptime checks.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Art Pricing Calculator API is running"
    }))
}
