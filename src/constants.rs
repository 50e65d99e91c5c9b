//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override these at startup, see `config.rs`.

use std::path::PathBuf;

/// Seed for the synthetic training data and the classifiers
pub const DEFAULT_SEED: u64 = 42;

/// Synthetic samples generated per disease
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Trees per ensemble (boosting rounds or forest size)
pub const DEFAULT_ESTIMATORS: usize = 100;

/// Report database file name
pub const DEFAULT_DB_FILE: &str = "diagnosai.db";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "DiagnosAI";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get training seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("DIAGNOSAI_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// Get synthetic sample count from environment or use default
pub fn get_sample_count() -> usize {
    std::env::var("DIAGNOSAI_SAMPLES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_COUNT)
}

/// Get ensemble size from environment or use default
pub fn get_estimators() -> usize {
    std::env::var("DIAGNOSAI_ESTIMATORS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ESTIMATORS)
}

/// Get report database path from environment or use the app data directory
pub fn get_db_path() -> PathBuf {
    std::env::var("DIAGNOSAI_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("diagnosai")
                .join(DEFAULT_DB_FILE)
        })
}
