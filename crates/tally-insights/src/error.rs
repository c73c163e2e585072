//! # Insight Error Types
//!
//! Error types for the analytics engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Insight Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Data Source   │  │     Input Records       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Source         │  │  Core(InvalidRecord)    │ │
//! │  │  ConfigLoad…    │  │  Json           │  │                         │ │
//! │  │  ConfigSave…    │  │  Io             │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty input and zero denominators never produce an error; reports return
//! zero-valued results instead.

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for insight operations.
pub type InsightResult<T> = Result<T, InsightError>;

/// Errors surfaced by the analytics engine.
#[derive(Debug, Error)]
pub enum InsightError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values break a rule (brackets, thresholds, rates).
    #[error("Invalid insights configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Data Source Errors
    // =========================================================================
    /// The data source could not produce a collection.
    #[error("Data source error: {0}")]
    Source(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// An input record is malformed.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Conversions
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for InsightError {
    fn from(err: ValidationError) -> Self {
        InsightError::InvalidConfig(err.to_string())
    }
}

impl From<toml::de::Error> for InsightError {
    fn from(err: toml::de::Error) -> Self {
        InsightError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for InsightError {
    fn from(err: toml::ser::Error) -> Self {
        InsightError::ConfigSaveFailed(err.to_string())
    }
}
