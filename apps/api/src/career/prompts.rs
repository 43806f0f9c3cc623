// Career extraction LLM prompts.

/// System turn for CV extraction. The CV itself is sent as the user turn.
pub const CAREER_EXTRACT_SYSTEM: &str = r#"Extract career information from this CV and return ONLY valid JSON (no markdown, no code blocks) with:
{
    "yearsExperience": number,
    "exhibitions": number,
    "exhibitionDetails": "string",
    "awards": number,
    "awardDetails": "string",
    "fellowships": number,
    "fellowshipDetails": "string",
    "publications": number,
    "publicationDetails": "string",
    "residencies": number,
    "residencyDetails": "string",
    "representation": "none|emerging|midsize|bluechip|megagallery",
    "education": "string",
    "notableAchievements": ["string1", "string2", "string3"]
}"#;

pub const CAREER_EXTRACT_TEMPERATURE: f64 = 0.3;
pub const CAREER_EXTRACT_MAX_TOKENS: u32 = 800;
