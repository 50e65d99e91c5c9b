//! Model Module - Training and Inference
//!
//! Per-disease standardization plus a tree ensemble classifier, trained
//! once at startup from synthetic data.
//!
//! ## Structure
//! - `tree`: second-order regression tree shared by both ensembles
//! - `boosting` / `forest`: the two classifier families
//! - `classifier`: family selection per disease and dispatch
//! - `registry`: trains and holds every disease's model
//! - `inference`: `DiseasePredictor`, the prediction entry point
//! - `threshold`: confidence → risk tier
//!
//! ## Usage
//! ```ignore
//! let predictor = DiseasePredictor::from_config(&TrainingConfig::default())?;
//! let result = predictor.predict("covid", &symptoms);
//! ```

pub mod boosting;
pub mod classifier;
pub mod forest;
pub mod inference;
pub mod registry;
pub mod scaler;
pub mod threshold;
pub mod tree;
pub mod types;


// Re-export common types
pub use classifier::{Classifier, ClassifierKind, ProbabilisticClassifier};
pub use inference::DiseasePredictor;
pub use registry::{ModelRegistry, TrainedModel};
pub use scaler::StandardScaler;
pub use threshold::{RiskThresholds, HIGH_RISK_CONFIDENCE, MEDIUM_RISK_CONFIDENCE};
pub use types::{PredictionResult, RiskLevel, ERROR_PREDICTION};
