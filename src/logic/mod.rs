//! Logic Module - Prediction Engine
//!
//! ## Architecture
//! - `features/` - Disease schemas and feature vectors
//! - `dataset/` - Seeded synthetic training sets
//! - `model/` - Training and inference
//! - `report/` - Diagnostic history

pub mod dataset;
pub mod features;
pub mod model;
pub mod report;
