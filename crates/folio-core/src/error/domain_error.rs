//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(RecordId),

    #[error("Article not found")]
    ArticleNotFound(RecordId),

    #[error("Like not found")]
    ReactionNotFound(RecordId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Quantity must be 1 or -1, got {0}")]
    InvalidPolarity(i64),

    #[error("Malformed id: {0}")]
    InvalidId(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ArticleNotFound(_) => "UNKNOWN_ARTICLE",
            Self::ReactionNotFound(_) => "UNKNOWN_LIKE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPolarity(_) => "INVALID_QUANTITY",
            Self::InvalidId(_) => "INVALID_ID",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ArticleNotFound(_) | Self::ReactionNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidPolarity(_) | Self::InvalidId(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::ReactionAlreadyExists)
    }
}

impl From<crate::value_objects::RecordIdParseError> for DomainError {
    fn from(err: crate::value_objects::RecordIdParseError) -> Self {
        Self::InvalidId(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ArticleNotFound(RecordId::new());
        assert_eq!(err.code(), "UNKNOWN_ARTICLE");

        let err = DomainError::InvalidPolarity(3);
        assert_eq!(err.code(), "INVALID_QUANTITY");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(RecordId::new()).is_not_found());
        assert!(DomainError::ReactionNotFound(RecordId::new()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::ReactionAlreadyExists.is_conflict());
        assert!(!DomainError::InvalidId("x".to_string()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ArticleNotFound(RecordId::new());
        assert_eq!(err.to_string(), "Article not found");

        let err = DomainError::InvalidPolarity(0);
        assert_eq!(err.to_string(), "Quantity must be 1 or -1, got 0");
    }
}
