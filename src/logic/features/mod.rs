//! Features Module - Feature Schema Registry
//!
//! Static mapping from disease to its ordered symptom features, and the
//! conversion of request symptom maps into model input vectors.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{disease_ids, features_for, Disease, LayoutInfo, FEATURE_VERSION};
pub use vector::{FeatureVector, SymptomMap};
