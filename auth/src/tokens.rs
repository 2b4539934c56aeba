use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenUse;

/// Issues and validates time-limited identity tokens.
///
/// Holds the shared signing secret and the lifetimes of the two token kinds.
/// Stateless apart from configuration, so one instance is shared by every
/// request.
pub struct TokenEngine {
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenEngine {
    /// Create a new token engine.
    ///
    /// # Arguments
    /// * `secret` - Secret key for HS256 signing
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access token for a subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.encode(&Claims::for_subject(
            subject,
            TokenUse::Access,
            self.access_ttl,
        ))
    }

    /// Issue a refresh token for a subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.encode(&Claims::for_subject(
            subject,
            TokenUse::Refresh,
            self.refresh_ttl,
        ))
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `Malformed`, `InvalidSignature`, `Expired` - see [`JwtHandler::decode`]
    /// * `MissingClaim` - `sub` absent or empty
    /// * `WrongTokenUse` - A refresh token was presented
    pub fn validate_access_token(&self, token: &str) -> Result<String, JwtError> {
        self.validate(token, TokenUse::Access)
    }

    /// Validate a refresh token and return its subject.
    ///
    /// # Errors
    /// Same as [`TokenEngine::validate_access_token`], with `WrongTokenUse`
    /// raised for access tokens.
    pub fn validate_refresh_token(&self, token: &str) -> Result<String, JwtError> {
        self.validate(token, TokenUse::Refresh)
    }

    fn validate(&self, token: &str, expected: TokenUse) -> Result<String, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        let subject = claims
            .subject()
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?
            .to_string();

        match claims.token_use {
            Some(actual) if actual == expected => Ok(subject),
            Some(actual) => Err(JwtError::WrongTokenUse {
                expected: expected.as_str(),
                actual: actual.as_str(),
            }),
            None => Err(JwtError::WrongTokenUse {
                expected: expected.as_str(),
                actual: "unspecified",
            }),
        }
    }
}
