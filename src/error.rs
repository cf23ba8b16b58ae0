use thiserror::Error;

/// Errors raised at the edges of the calculator: configuration and I/O.
///
/// The engine and the input normalizer never fail; malformed loan input
/// degrades to a zero result instead.
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("Invalid configuration: {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalculatorError {
    pub(crate) fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        CalculatorError::InvalidConfig {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Standard result type for fallible calculator operations.
pub type CalculatorResult<T> = Result<T, CalculatorError>;
