use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
