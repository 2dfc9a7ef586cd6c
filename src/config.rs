//! Parser configuration
//!
//! Tunable thresholds for the topic engine. Defaults match the behavior the
//! forum application has always shipped with; a YAML file can override any
//! subset of fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{Result, TopicError};

/// Env var naming an optional YAML config file
pub const CONFIG_ENV_VAR: &str = "TOPIC_PARSER_CONFIG";

/// Configuration for mention extraction, grouping and titling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicParserConfig {
    /// Characters captured on each side of a mention token
    pub context_window: usize,

    /// A lone mention becomes a topic only if its context is longer than this
    pub rich_context_min_len: usize,

    /// Default `max_length` for auto-titles
    pub default_title_max_length: usize,

    /// When cutting a title mid-word, back up to a space only if it sits at
    /// or beyond this fraction of the cut point
    pub min_break_ratio: f64,

    /// Longest in-progress `@query` still treated as an autocomplete trigger
    pub max_query_len: usize,
}

impl Default for TopicParserConfig {
    fn default() -> Self {
        Self {
            context_window: 30,
            rich_context_min_len: 3,
            default_title_max_length: 80,
            min_break_ratio: 0.6,
            max_query_len: 40,
        }
    }
}

impl TopicParserConfig {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TopicError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::load_from_str(&content)?;
        info!("Loaded topic parser config from {}", path.display());
        Ok(config)
    }

    /// Load from a YAML string, validating the result
    pub fn load_from_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TOPIC_PARSER_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_window == 0 {
            return Err(invalid("context_window", "must be greater than zero"));
        }
        if self.default_title_max_length < 4 {
            return Err(invalid(
                "default_title_max_length",
                "must leave room for at least one character plus an ellipsis",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_break_ratio) {
            return Err(invalid("min_break_ratio", "must be between 0.0 and 1.0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> TopicError {
    TopicError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TopicParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.context_window, 30);
        assert_eq!(config.rich_context_min_len, 3);
        assert_eq!(config.default_title_max_length, 80);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TopicParserConfig::load_from_str("context_window: 50\n").unwrap();
        assert_eq!(config.context_window, 50);
        assert_eq!(config.default_title_max_length, 80);
        assert_eq!(config.max_query_len, 40);
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = TopicParserConfig::load_from_str("context_window: 0\n").unwrap_err();
        assert!(matches!(
            err,
            TopicError::InvalidConfig { ref field, .. } if field == "context_window"
        ));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let err = TopicParserConfig::load_from_str("min_break_ratio: 1.5\n").unwrap_err();
        assert!(matches!(err, TopicError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = TopicParserConfig::load_from_str("context_window: [").unwrap_err();
        assert!(matches!(err, TopicError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TopicParserConfig::load_from_file(Path::new("/nonexistent/topics.yaml"))
            .unwrap_err();
        assert!(matches!(err, TopicError::Io { .. }));
    }
}
