//! Report Module - Diagnostic history
//!
//! Saved predictions for the caller. The predictor itself never touches
//! the store.
//!
//! ## Usage
//! ```ignore
//! let store = ReportStore::open(&config.database_path)?;
//! let mut report = DiagnosticReport::new("covid", &symptoms, &result);
//! store.save(&mut report)?;
//! ```

pub mod record;
pub mod store;


pub use record::{risk_level_for_confidence, DiagnosticReport};
pub use store::ReportStore;
