use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the evaluation of one sport
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// Document could not be read from disk
    #[error("Failed to read document {path:?}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Document is not valid JSON of the expected shape
    #[error("Failed to parse document {path:?}: {source}")]
    ParseDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document parsed but holds no match
    #[error("{kind} document contains no results")]
    NoResults { kind: &'static str },

    #[error("Stake must be positive, got {0}")]
    InvalidStake(f64),

    #[error("Odds must be positive, got {0}")]
    InvalidOdds(f64),
}

/// A field that should parse as a number, score, line or timestamp does not.
///
/// Never surfaced from fact derivation: callers log it and fall back to a default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("invalid score format: {0}")]
    InvalidScore(String),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid handicap line: {0:?}")]
    InvalidLine(String),
}

pub fn validate_stake(stake: f64) -> Result<(), EvaluatorError> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(EvaluatorError::InvalidStake(stake));
    }
    Ok(())
}

pub fn validate_odds(odds: f64) -> Result<(), EvaluatorError> {
    if !odds.is_finite() || odds <= 0.0 {
        return Err(EvaluatorError::InvalidOdds(odds));
    }
    Ok(())
}
