//! Bindings from the `auth` crate to the library's credential ports.

use std::sync::Arc;
use std::sync::OnceLock;

use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenEngine;

use crate::library::errors::LibraryError;
use crate::library::models::AuthTokens;
use crate::library::ports::CredentialHasher;
use crate::library::ports::TokenIssuer;
use crate::user::models::UserId;

pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
    // Hash of a throwaway password under the same parameters, created on
    // first use.
    decoy: OnceLock<Option<String>>,
}

impl Argon2CredentialHasher {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            hasher,
            decoy: OnceLock::new(),
        }
    }

    fn decoy_hash(&self) -> Option<&str> {
        self.decoy
            .get_or_init(|| match self.hasher.hash("decoy-password") {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create decoy password hash");
                    None
                }
            })
            .as_deref()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash_password(&self, password: &str) -> Result<String, LibraryError> {
        self.hasher
            .hash(password)
            .map_err(|e| LibraryError::Internal(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<(), LibraryError> {
        match self.hasher.verify(password, hash) {
            Ok(()) => Ok(()),
            Err(PasswordError::Mismatch) => Err(LibraryError::InvalidCredentials),
            Err(e) => {
                tracing::error!(error = %e, "Stored password hash is unreadable");
                Err(LibraryError::Internal(e.to_string()))
            }
        }
    }

    fn verify_without_hash(&self, password: &str) {
        if let Some(decoy) = self.decoy_hash() {
            let _ = self.hasher.verify(password, decoy);
        }
    }
}

pub struct JwtTokenIssuer {
    engine: Arc<TokenEngine>,
}

impl JwtTokenIssuer {
    pub fn new(engine: Arc<TokenEngine>) -> Self {
        Self { engine }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_tokens(&self, user_id: &UserId) -> Result<AuthTokens, LibraryError> {
        let subject = user_id.to_string();

        let access_token = self
            .engine
            .issue_access_token(&subject)
            .map_err(|e| LibraryError::Internal(e.to_string()))?;
        let refresh_token = self
            .engine
            .issue_refresh_token(&subject)
            .map_err(|e| LibraryError::Internal(e.to_string()))?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }

    fn validate_refresh_token(&self, token: &str) -> Result<UserId, LibraryError> {
        let subject = self
            .engine
            .validate_refresh_token(token)
            .map_err(|e| LibraryError::InvalidToken(e.to_string()))?;

        UserId::from_string(&subject).map_err(|e| LibraryError::InvalidToken(e.to_string()))
    }
}
