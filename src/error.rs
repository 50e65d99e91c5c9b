//! Error handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagnosError>;

#[derive(Debug, Error)]
pub enum DiagnosError {
    #[error("Model for {0} not found")]
    UnknownDisease(String),

    #[error("Feature vector has {actual} columns, model expects {expected}")]
    FeatureLength { expected: usize, actual: usize },

    #[error("Feature layout mismatch for {disease}: expected {expected:08x}, got {actual:08x}")]
    LayoutMismatch {
        disease: String,
        expected: u32,
        actual: u32,
    },

    #[error("Non-finite values in {what} for {disease}")]
    NonFinite { disease: String, what: String },

    #[error("Training error: {0}")]
    Training(String),

    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),

    #[error("Stored report {id} is unreadable: {reason}")]
    CorruptReport { id: i64, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
