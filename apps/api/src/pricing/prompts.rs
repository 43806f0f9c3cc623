// Pricing calculator LLM prompts.

pub const PRICING_SYSTEM: &str =
    "You are an expert art pricing consultant. Return only valid JSON.";

/// JSON shape the model must return, embedded verbatim in the user prompt.
pub const PRICING_RESPONSE_SCHEMA: &str = r#"{
    "baseCost": number,
    "marketPrice": number,
    "premiumPrice": number,
    "reasoning": {
        "costBreakdown": "string explaining costs",
        "marketAnalysis": "string explaining market position",
        "valueProposition": "string explaining unique value"
    },
    "recommendations": ["tip 1", "tip 2", "tip 3"]
}"#;

pub const PRICING_TEMPERATURE: f64 = 0.7;
pub const PRICING_MAX_TOKENS: u32 = 800;
