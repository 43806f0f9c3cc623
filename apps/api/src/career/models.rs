use serde::{Deserialize, Serialize};

/// Gallery representation tier, from no representation up to mega-gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    #[default]
    None,
    Emerging,
    Midsize,
    Bluechip,
    Megagallery,
}

/// Career history extracted from a CV.
///
/// This is the shape the model is asked for. Replies are only checked for
/// JSON validity before being returned, so callers may still see other shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInfo {
    pub years_experience: u32,
    pub exhibitions: u32,
    pub exhibition_details: String,
    pub awards: u32,
    pub award_details: String,
    pub fellowships: u32,
    pub fellowship_details: String,
    pub publications: u32,
    pub publication_details: String,
    pub residencies: u32,
    pub residency_details: String,
    pub representation: Representation,
    pub education: String,
    pub notable_achievements: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRequest {
    pub full_text: String,
}

/// `careerInfo` holds JSON *text*; clients parse it a second time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerResponse {
    pub career_info: String,
}
