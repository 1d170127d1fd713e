use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Internal server error")]
    InternalServerError,
}
