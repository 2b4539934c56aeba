use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid token signature: {0}")]
    InvalidSignature(String),

    #[error("Token is expired")]
    Expired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Token issued for {actual} use, expected {expected}")]
    WrongTokenUse {
        expected: &'static str,
        actual: &'static str,
    },
}
