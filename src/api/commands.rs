//! Predict commands
//!
//! Callers hand over loosely typed values (form strings, JSON numbers,
//! booleans). Everything is coerced to `f64` here so the predictor only
//! ever sees a `SymptomMap`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logic::features::{features_for, SymptomMap};
use crate::logic::model::{DiseasePredictor, PredictionResult, RiskLevel};

// ============================================================================
// COERCION
// ============================================================================

/// Numbers as is, numeric strings parsed, booleans 1/0, anything else 0.0
pub fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_or_zero(s),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn parse_or_zero(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Coerce every entry of a JSON object
pub fn coerce_symptoms(raw: &Map<String, Value>) -> SymptomMap {
    raw.iter()
        .map(|(name, value)| (name.clone(), coerce_value(value)))
        .collect()
}

/// Collect only the disease's schema features from form fields.
///
/// Missing or unparsable fields become 0.0. Unknown diseases yield an empty
/// map; the predictor then reports the error.
pub fn collect_form_symptoms(disease_id: &str, form: &HashMap<String, String>) -> SymptomMap {
    features_for(disease_id)
        .iter()
        .map(|&name| {
            let value = form.get(name).map(|s| parse_or_zero(s)).unwrap_or(0.0);
            (name.to_string(), value)
        })
        .collect()
}

// ============================================================================
// REQUEST / RESPONSE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Missing reads as empty and comes back as a soft error
    #[serde(default)]
    pub disease_type: String,
    #[serde(default)]
    pub symptoms: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    /// Wrap a predictor result. Soft errors still count as a handled request.
    pub fn from_result(disease_type: &str, result: PredictionResult) -> Self {
        Self {
            success: true,
            prediction: Some(result.prediction),
            confidence: Some(result.confidence),
            risk_level: Some(result.risk_level),
            disease_type: Some(disease_type.to_string()),
            error: result.error,
        }
    }

    /// Request could not be read at all
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            prediction: None,
            confidence: None,
            risk_level: None,
            disease_type: None,
            error: Some(message.into()),
        }
    }
}

pub fn predict(predictor: &DiseasePredictor, request: &PredictRequest) -> PredictResponse {
    let symptoms = coerce_symptoms(&request.symptoms);
    let result = predictor.predict(&request.disease_type, &symptoms);
    PredictResponse::from_result(&request.disease_type, result)
}

/// Parse a JSON body and predict
pub fn predict_json(predictor: &DiseasePredictor, body: &str) -> PredictResponse {
    match serde_json::from_str::<PredictRequest>(body) {
        Ok(request) => predict(predictor, &request),
        Err(e) => {
            log::warn!("Rejected predict request: {}", e);
            PredictResponse::failure(e.to_string())
        }
    }
}
