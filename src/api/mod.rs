//! API Module
//!
//! Request boundary between raw caller input and the predictor.
//!
//! Structure:
//! - commands.rs: symptom coercion, JSON predict request/response
//! - status.rs: schema and trained-model summaries
//!
//! Usage:
//! - `api::predict_json(&predictor, body)` - JSON in, response out
//! - `api::schema_info("covid")` - feature list for a form

pub mod commands;
pub mod status;


pub use commands::*;
pub use status::*;
