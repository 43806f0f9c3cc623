use axum::{extract::State, Json};
use tracing::error;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::pricing::calculator::calculate_pricing;
use crate::pricing::models::{PricingInput, PricingRequest, PricingResponse};
use crate::state::AppState;

/// POST /calculate-pricing
///
/// `pricingResult` is the parsed object when the model returned valid JSON,
/// otherwise the cleaned reply text. A section missing a required key fails
/// the whole request with 500.
pub async fn handle_calculate_pricing(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let input = PricingInput::try_from(request).map_err(|e| {
        error!("Error in calculate_pricing: {e}");
        AppError::InvalidSection(e.to_string())
    })?;

    let pricing_result = calculate_pricing(&input, state.llm.as_ref())
        .await
        .map_err(|e| AppError::llm("calculate_pricing", e))?;

    Ok(Json(PricingResponse { pricing_result }))
}
