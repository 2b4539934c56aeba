//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation (HS256 only)
//! - Access/refresh token issuance with lifetimes
//!
//! Services define their own authentication traits and adapt these
//! implementations, which keeps domain logic out of this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenEngine;
//! use chrono::Duration;
//!
//! let engine = TokenEngine::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//! let token = engine.issue_access_token("user123").unwrap();
//! assert_eq!(engine.validate_access_token(&token).unwrap(), "user123");
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenUse;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenEngine;
