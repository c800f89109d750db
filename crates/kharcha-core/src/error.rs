//! Error types for kharcha-core
//!
//! Provides error codes for programmatic handling plus a detailed form
//! suitable for API payloads.

use kharcha_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Validation error at entry time
    ValidationError,
    /// Entry not found in the stored list
    EntryNotFound,
    /// Storage backend error
    StoreError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::EntryNotFound => write!(f, "ENTRY_NOT_FOUND"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid date/time: {value}")]
    InvalidDateTime { value: String },

    #[error("Entry not found at position {index}")]
    EntryNotFound { index: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidAmount { .. } => ErrorCode::ValidationError,
            CoreError::InvalidDateTime { .. } => ErrorCode::ValidationError,
            CoreError::EntryNotFound { .. } => ErrorCode::EntryNotFound,
            CoreError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidAmount { .. } => {
                details = details
                    .with_suggestion("Enter an amount greater than zero.".to_string());
            }
            CoreError::InvalidDateTime { .. } => {
                details = details
                    .with_suggestion("Use the YYYY-MM-DDTHH:MM format.".to_string());
            }
            CoreError::EntryNotFound { .. } => {
                details = details.with_suggestion(
                    "Refresh the list; the blob may have changed since it was rendered."
                        .to_string(),
                );
            }
            _ => {}
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CoreError::InvalidAmount {
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err = CoreError::EntryNotFound { index: 7 };
        assert_eq!(err.code(), ErrorCode::EntryNotFound);
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_error_details() {
        let err = CoreError::InvalidDateTime {
            value: "yesterday".to_string(),
        };
        let details = err.to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert!(!details.suggestions.is_empty());
    }
}
