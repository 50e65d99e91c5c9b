//! Risk tiers
//!
//! Maps a percentage confidence onto Low / Medium / High. Both bounds are
//! strict: exactly 70 is Medium, exactly 50 is Low.

use serde::{Deserialize, Serialize};

use super::types::RiskLevel;

/// Confidence strictly above this is High
pub const HIGH_RISK_CONFIDENCE: f64 = 70.0;

/// Confidence strictly above this (and not High) is Medium
pub const MEDIUM_RISK_CONFIDENCE: f64 = 50.0;

/// Tier bounds in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: HIGH_RISK_CONFIDENCE,
            medium: MEDIUM_RISK_CONFIDENCE,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, confidence: f64) -> RiskLevel {
        if confidence > self.high {
            RiskLevel::High
        } else if confidence > self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl RiskLevel {
    /// Tier for a percentage confidence using the default bounds
    pub fn from_confidence(confidence: f64) -> Self {
        RiskThresholds::default().classify(confidence)
    }
}

/// Probability → percentage rounded to 2 decimals
pub fn to_confidence(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}
