//! Error types for factroot

use crate::provenance::Source;
use thiserror::Error;

/// Result type alias using FactRootError
pub type Result<T> = std::result::Result<T, FactRootError>;

/// Error type alias for convenience
pub type Error = FactRootError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for factroot
#[derive(Debug, Error)]
pub enum FactRootError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A knowledge source lookup failed. Recovered by the resolver, never
    /// returned from `Resolver::resolve`.
    #[error("Knowledge source {source_kind} failed: {message}")]
    Adapter { source_kind: Source, message: String },

    #[error("Prediction unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("Invalid precondition: {0}")]
    InvalidPrecondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl FactRootError {
    /// Build an adapter failure for the given knowledge source
    pub fn adapter(source_kind: Source, message: impl Into<String>) -> Self {
        Self::Adapter {
            source_kind,
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPrecondition(_)
            | Self::InvalidInput(_)
            | Self::Config(_)
            | Self::Parse(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            FactRootError::InvalidPrecondition("x".into()).exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            FactRootError::Config("bad".into()).exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            FactRootError::PredictionUnavailable("down".into()).exit_code(),
            exit_codes::GENERAL_ERROR
        );
    }

    #[test]
    fn test_adapter_error_message() {
        let err = FactRootError::adapter(Source::Handbook, "connection reset");
        assert_eq!(
            err.to_string(),
            "Knowledge source HANDBOOK failed: connection reset"
        );
    }
}
