//! Error handling for the joint-venture simulator
//!
//! The calculation layer never returns errors: invalid numeric input
//! degrades to zero by contract. Errors come from configuration parsing,
//! validation, and the scenario store.

use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the simulator
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Scenario store errors
    #[error("Scenario store error: {message}")]
    Store { message: String },

    /// Scenario lookup failures
    #[error("Scenario not found: {name}")]
    ScenarioNotFound { name: String },

    /// Report rendering errors
    #[error("Report error: {message}")]
    Report { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a scenario store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a scenario-not-found error
    pub fn scenario_not_found(name: impl Into<String>) -> Self {
        Self::ScenarioNotFound { name: name.into() }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::Io(_) => "io",
            Error::Config { .. } => "config",
            Error::Store { .. } => "store",
            Error::ScenarioNotFound { .. } => "scenario_not_found",
            Error::Report { .. } => "report",
        }
    }
}
