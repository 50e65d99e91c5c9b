//! Configuration module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{DiagnosError, Result};

/// Parameters of the startup training run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Seed for every synthetic dataset and classifier
    pub seed: u64,

    /// Samples per synthetic dataset
    pub n_samples: usize,

    /// Trees per ensemble
    pub n_estimators: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: constants::DEFAULT_SEED,
            n_samples: constants::DEFAULT_SAMPLE_COUNT,
            n_estimators: constants::DEFAULT_ESTIMATORS,
        }
    }
}

impl TrainingConfig {
    /// Reject values that cannot produce a two-class training set
    pub fn validate(&self) -> Result<()> {
        if self.n_samples < 2 {
            return Err(DiagnosError::Config(format!(
                "n_samples must be at least 2, got {}",
                self.n_samples
            )));
        }
        if self.n_estimators == 0 {
            return Err(DiagnosError::Config("n_estimators must be positive".to_string()));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Training run parameters
    pub training: TrainingConfig,

    /// SQLite file holding diagnostic reports
    pub database_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            training: TrainingConfig {
                seed: constants::get_seed(),
                n_samples: constants::get_sample_count(),
                n_estimators: constants::get_estimators(),
            },
            database_path: constants::get_db_path(),
        }
    }
}
