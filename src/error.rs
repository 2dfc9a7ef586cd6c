//! Error types for the mention/topic engine
//!
//! The parsing pipeline itself never fails: malformed tokens are skipped and
//! missing context simply stays absent. Errors only surface at the edges,
//! when loading configuration or serializing results for callers.

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum TopicError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    ConfigParse(String),

    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<serde_yaml::Error> for TopicError {
    fn from(error: serde_yaml::Error) -> Self {
        TopicError::ConfigParse(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TopicError>;
