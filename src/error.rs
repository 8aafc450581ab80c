use thiserror::Error;

/// Failure of a single scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A required field is missing, malformed or out of range
    #[error("{0}")]
    Validation(String),

    /// The computation itself went wrong (e.g. produced a non-finite number)
    #[error("{0}")]
    Unexpected(String),
}

impl ScoringError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_bare_message() {
        let err = ScoringError::validation("Missing required fields");
        assert_eq!(err.to_string(), "Missing required fields");

        let err = ScoringError::unexpected("price is not finite");
        assert_eq!(err.to_string(), "price is not finite");
    }

    #[test]
    fn test_is_validation() {
        assert!(ScoringError::validation("x").is_validation());
        assert!(!ScoringError::unexpected("x").is_validation());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<ScoringError>();
        assert_sync::<ScoringError>();
    }
}
