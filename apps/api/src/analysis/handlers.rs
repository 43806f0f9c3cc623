use axum::{extract::State, Json};

use crate::analysis::analyzer::{analyze, AnalyzeRequest, AnalyzeResponse};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let result = analyze(&request.prompt, state.llm.as_ref())
        .await
        .map_err(|e| AppError::llm("analyze", e))?;

    Ok(Json(AnalyzeResponse { result }))
}
