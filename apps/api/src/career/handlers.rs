use axum::{extract::State, Json};

use crate::career::extractor::extract_career;
use crate::career::models::{CareerResponse, CvRequest};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /extract-career
///
/// Returns the extracted career history as JSON text under `careerInfo`.
pub async fn handle_extract_career(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CvRequest>,
) -> Result<Json<CareerResponse>, AppError> {
    let career_info = extract_career(&request.full_text, state.llm.as_ref())
        .await
        .map_err(|e| AppError::llm("extract_career", e))?;

    Ok(Json(CareerResponse { career_info }))
}
