//! DiagnosAI Core - Disease Risk Prediction
//!
//! Trains one classifier per supported disease from seeded synthetic data
//! and answers `(disease, symptoms)` queries with a label, a confidence and
//! a risk tier.
//!
//! ## Structure
//! - `logic::features`: disease schema registry and feature vectors
//! - `logic::dataset`: synthetic training data
//! - `logic::model`: scaler, tree ensembles, registry, predictor
//! - `logic::report`: saved diagnostic history (SQLite)
//! - `api`: request coercion and JSON responses
//!
//! ## Usage
//! ```ignore
//! use diagnosai_core::{DiseasePredictor, SymptomMap, TrainingConfig};
//!
//! let predictor = DiseasePredictor::from_config(&TrainingConfig::default())?;
//! let result = predictor.predict("diabetes", &SymptomMap::new());
//! println!("{} ({}%, {})", result.prediction, result.confidence, result.risk_level);
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{Config, TrainingConfig};
pub use error::{DiagnosError, Result};
pub use logic::features::{disease_ids, features_for, Disease, FeatureVector, SymptomMap};
pub use logic::model::{DiseasePredictor, ModelRegistry, PredictionResult, RiskLevel};
pub use logic::report::{DiagnosticReport, ReportStore};
