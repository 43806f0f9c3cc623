//! Request and response types for the pricing calculator.
//!
//! The wire request carries five loosely-typed objects. They are accepted as
//! JSON maps and then converted section by section into the typed structs
//! below, so a missing key is reported with the section it belongs to.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A form value. The calculator sends numbers and text; booleans and `null`
/// are accepted too and rendered the way the original form backend printed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Zero, the empty string, `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Bool(b) => *b,
            Scalar::Null => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
            Scalar::Null => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDetails {
    pub title: Scalar,
    pub medium: Scalar,
    pub width: Scalar,
    pub height: Scalar,
    #[serde(default)]
    pub depth: Option<Scalar>,
    pub year_created: Scalar,
    pub materials_used: Scalar,
    pub complexity: Scalar,
    pub emotional_value: Scalar,
}

impl ArtworkDetails {
    /// `W" × H"`, with ` × D"` appended only for a truthy depth.
    pub fn size_label(&self) -> String {
        let mut label = format!("{}\" × {}\"", self.width, self.height);
        if let Some(depth) = self.depth.as_ref().filter(|d| d.is_truthy()) {
            label.push_str(&format!(" × {depth}\""));
        }
        label
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Costs {
    pub materials: Number,
    pub framing: Number,
    pub studio: Number,
    pub other: Number,
}

impl Costs {
    pub fn total(&self) -> Number {
        sum_numbers(&[&self.materials, &self.framing, &self.studio, &self.other])
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInvestment {
    pub concept_development: Number,
    pub creation: Number,
    pub finishing: Number,
}

impl TimeInvestment {
    pub fn total_hours(&self) -> Number {
        sum_numbers(&[&self.concept_development, &self.creation, &self.finishing])
    }
}

/// The artist's career summary as entered in the calculator form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub years_experience: Scalar,
    pub exhibitions: Scalar,
    pub awards: Scalar,
    pub representation: Scalar,
    pub education: Scalar,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFactors {
    pub demand_level: Scalar,
    pub target_market: Scalar,
    pub economic_climate: Scalar,
    pub location: Scalar,
}

/// Wire shape of POST /calculate-pricing. Each section only has to be an object here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub artwork_details: Map<String, Value>,
    pub costs: Map<String, Value>,
    pub time_investment: Map<String, Value>,
    pub career_info: Map<String, Value>,
    pub market_factors: Map<String, Value>,
}

#[derive(Debug, Error)]
#[error("{section}: {source}")]
pub struct SectionError {
    pub section: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Fully typed pricing input.
#[derive(Debug, Clone)]
pub struct PricingInput {
    pub artwork: ArtworkDetails,
    pub costs: Costs,
    pub time: TimeInvestment,
    pub career: CareerSummary,
    pub market: MarketFactors,
}

impl TryFrom<PricingRequest> for PricingInput {
    type Error = SectionError;

    fn try_from(request: PricingRequest) -> Result<Self, Self::Error> {
        Ok(PricingInput {
            artwork: section("artworkDetails", request.artwork_details)?,
            costs: section("costs", request.costs)?,
            time: section("timeInvestment", request.time_investment)?,
            career: section("careerInfo", request.career_info)?,
            market: section("marketFactors", request.market_factors)?,
        })
    }
}

fn section<T: DeserializeOwned>(
    name: &'static str,
    fields: Map<String, Value>,
) -> Result<T, SectionError> {
    serde_json::from_value(Value::Object(fields)).map_err(|source| SectionError {
        section: name,
        source,
    })
}

/// Integer sum when every addend is an integer, floating-point sum otherwise.
pub fn sum_numbers(values: &[&Number]) -> Number {
    let integral = values
        .iter()
        .try_fold(0i64, |acc, n| n.as_i64().and_then(|v| acc.checked_add(v)));
    if let Some(total) = integral {
        return Number::from(total);
    }

    let total: f64 = values.iter().filter_map(|n| n.as_f64()).sum();
    Number::from_f64(total).unwrap_or_else(|| Number::from(0))
}

/// The shape the model is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub base_cost: f64,
    pub market_price: f64,
    pub premium_price: f64,
    pub reasoning: PricingReasoning,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReasoning {
    pub cost_breakdown: String,
    pub market_analysis: String,
    pub value_proposition: String,
}

/// Parsed JSON when the reply was valid, otherwise the cleaned reply text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PricingOutcome {
    Parsed(Value),
    Raw(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub pricing_result: PricingOutcome,
}
