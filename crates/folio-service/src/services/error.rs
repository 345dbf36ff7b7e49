//! Service layer error types

use folio_common::{domain_status, AppError};
use folio_core::DomainError;
use thiserror::Error;

/// Failure of a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violation, including not-found and malformed ids
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Auth and other cross-cutting failures
    #[error(transparent)]
    App(#[from] AppError),

    /// The service context was assembled without one of its collaborators
    #[error("{0} is required to build the service context")]
    MissingDependency(&'static str),

    /// A concurrent writer won, or a unique key is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A state the services never expect to reach
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Conflict(_) => 409,
            Self::MissingDependency(_) | Self::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Conflict(_) => "CONFLICT",
            Self::MissingDependency(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            other @ (ServiceError::MissingDependency(_) | ServiceError::Internal(_)) => {
                AppError::internal(anyhow::anyhow!(other.to_string()))
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::RecordId;

    #[test]
    fn test_missing_article_maps_to_unknown_article() {
        let err = ServiceError::from(DomainError::ArticleNotFound(RecordId::new()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_ARTICLE");
        assert_eq!(err.to_string(), "Article not found");
    }

    #[test]
    fn test_invalid_polarity_is_client_error() {
        let err = ServiceError::from(DomainError::InvalidPolarity(2));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_QUANTITY");
    }

    #[test]
    fn test_lost_race_is_conflict() {
        let err = ServiceError::conflict("Like changed concurrently");
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::from(DomainError::ReactionNotFound(RecordId::new())).into();
        assert_eq!(app_err.status_code(), 404);
        assert_eq!(app_err.error_code(), "UNKNOWN_LIKE");

        let wiring: AppError = ServiceError::MissingDependency("jwt_service").into();
        assert_eq!(wiring.status_code(), 500);
        assert_eq!(wiring.public_message(), "Internal server error");
    }
}
