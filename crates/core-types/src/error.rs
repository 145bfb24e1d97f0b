use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Not enough data for {context}: requires at least {required} observations, got {actual}")]
    InsufficientData {
        context: String,
        required: usize,
        actual: usize,
    },

    #[error("Series length mismatch in {context}: {left} vs {right}")]
    LengthMismatch {
        context: String,
        left: usize,
        right: usize,
    },

    #[error("Calculation error: {0}")]
    Calculation(String),
}
