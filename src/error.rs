use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl MortgageError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MortgageError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
