use thiserror::Error;

/// Errors that can occur when converting or parsing date values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Date out of range: {0}")]
    OutOfRange(String),
    #[error("Invalid date format '{input}'. Expected {expected}")]
    InvalidFormat {
        input: String,
        expected: &'static str,
    },
}

/// Result type for date operations.
pub type Result<T> = std::result::Result<T, DateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_display() {
        let error = DateError::InvalidFormat {
            input: "03/01/2015".to_string(),
            expected: "YYYY-MM-DD",
        };
        assert_eq!(
            error.to_string(),
            "Invalid date format '03/01/2015'. Expected YYYY-MM-DD"
        );
    }
}
