//! Pricing calculator: derives totals, renders the consultant prompt and
//! interprets the reply.

use tracing::warn;

use crate::llm_client::recovery::{parse_reply, ReplyJson};
use crate::llm_client::{ChatMessage, CompletionClient, CompletionRequest, LlmError};
use crate::pricing::models::{PricingInput, PricingOutcome, PricingResult};
use crate::pricing::prompts::{
    PRICING_MAX_TOKENS, PRICING_RESPONSE_SCHEMA, PRICING_SYSTEM, PRICING_TEMPERATURE,
};

/// Renders the user prompt with every form field and the derived totals.
pub fn build_pricing_prompt(input: &PricingInput) -> String {
    let PricingInput {
        artwork,
        costs,
        time,
        career,
        market,
    } = input;

    format!(
        r#"As an art pricing consultant, analyze the following artwork details and provide pricing recommendations:

ARTWORK: "{title}"
Medium: {medium}
Size: {size}
Year: {year}
Materials: {materials_used}
Complexity: {complexity}
Emotional Value: {emotional_value}

COSTS:
Materials: ${materials}
Framing: ${framing}
Studio: ${studio}
Other: ${other}
Total Costs: ${total_costs}

TIME INVESTMENT:
Total Hours: {total_hours}
(Concept: {concept}h, Creation: {creation}h, Finishing: {finishing}h)

ARTIST CAREER:
Experience: {years} years
Exhibitions: {exhibitions} total
Awards: {awards} total
Representation: {representation}
Education: {education}

MARKET FACTORS:
Demand Level: {demand}
Target Market: {target}
Economic Climate: {climate}
Location: {location}

Provide pricing recommendations as valid JSON with:
{schema}

Return ONLY valid JSON without any markdown formatting or code blocks."#,
        title = artwork.title,
        medium = artwork.medium,
        size = artwork.size_label(),
        year = artwork.year_created,
        materials_used = artwork.materials_used,
        complexity = artwork.complexity,
        emotional_value = artwork.emotional_value,
        materials = costs.materials,
        framing = costs.framing,
        studio = costs.studio,
        other = costs.other,
        total_costs = costs.total(),
        total_hours = time.total_hours(),
        concept = time.concept_development,
        creation = time.creation,
        finishing = time.finishing,
        years = career.years_experience,
        exhibitions = career.exhibitions,
        awards = career.awards,
        representation = career.representation,
        education = career.education,
        demand = market.demand_level,
        target = market.target_market,
        climate = market.economic_climate,
        location = market.location,
        schema = PRICING_RESPONSE_SCHEMA,
    )
}

/// Asks the model for pricing recommendations.
///
/// Unlike career extraction there is no default document: an unparsable
/// reply is handed back as its cleaned text. A reply with no content at all
/// fails the request.
pub async fn calculate_pricing(
    input: &PricingInput,
    llm: &dyn CompletionClient,
) -> Result<PricingOutcome, LlmError> {
    let request = CompletionRequest::new(
        vec![
            ChatMessage::system(PRICING_SYSTEM),
            ChatMessage::user(build_pricing_prompt(input)),
        ],
        PRICING_TEMPERATURE,
        PRICING_MAX_TOKENS,
    )?;

    let reply = llm.complete(&request).await?.ok_or(LlmError::EmptyContent)?;

    Ok(match parse_reply(Some(&reply)) {
        ReplyJson::Parsed { value, .. } => {
            if let Err(e) = serde_json::from_value::<PricingResult>(value.clone()) {
                warn!("Pricing reply does not match the requested schema: {e}");
            }
            PricingOutcome::Parsed(value)
        }
        ReplyJson::Unparsable(text) => {
            warn!("Pricing reply is not valid JSON, returning raw text");
            PricingOutcome::Raw(text)
        }
        ReplyJson::Empty => PricingOutcome::Raw(String::new()),
    })
}
