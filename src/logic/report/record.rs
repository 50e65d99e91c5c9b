//! Diagnostic report record

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::SymptomMap;
use crate::logic::model::{PredictionResult, RiskLevel};

/// One saved prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// Row id, `None` until saved
    pub id: Option<i64>,
    pub disease_type: String,
    /// Sorted by name so the stored JSON is stable
    pub symptoms: BTreeMap<String, f64>,
    pub prediction_result: String,
    /// Percent, as returned by the predictor
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

impl DiagnosticReport {
    /// Snapshot a prediction and the symptoms that produced it
    pub fn new(disease_type: &str, symptoms: &SymptomMap, result: &PredictionResult) -> Self {
        Self {
            id: None,
            disease_type: disease_type.to_string(),
            symptoms: symptoms.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            prediction_result: result.prediction.clone(),
            confidence: result.confidence,
            risk_level: result.risk_level,
            timestamp: Utc::now(),
        }
    }

    /// Symptoms back as a lookup map
    pub fn symptom_map(&self) -> SymptomMap {
        self.symptoms.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Stored tier, or the one implied by `confidence` when the stored
    /// value is unreadable
    pub fn tier(&self) -> RiskLevel {
        match self.risk_level {
            RiskLevel::Unknown if self.confidence > 0.0 => {
                risk_level_for_confidence(self.confidence)
            }
            level => level,
        }
    }
}

/// Tier for a stored percentage, same bounds as live predictions
pub fn risk_level_for_confidence(confidence: f64) -> RiskLevel {
    RiskLevel::from_confidence(confidence)
}
