use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Degenerate rate in {context}: the closed-form formula divides by a zero growth term")]
    DegenerateRate { context: String },

    #[error("Arithmetic overflow in {context}: result is not a finite number")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(e: serde_json::Error) -> Self {
        FinanceError::SerializationError(e.to_string())
    }
}
