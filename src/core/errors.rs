use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// No session, or the session token could not be verified
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated, but not a permitted actor for the resource
    #[error("{0}")]
    Forbidden(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("Email already taken")]
    EmailTaken,

    /// Store operation failed; the detail is logged, never returned to callers
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ClinicError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClinicError::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ClinicError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ClinicError::NotFound(message.into())
    }
}
