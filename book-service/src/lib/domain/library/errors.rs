use thiserror::Error;

use crate::book::errors::BookTitleError;
use crate::file::errors::FileTokenError;
use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// Error for file storage provider operations
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Request to storage provider failed: {0}")]
    Request(String),

    #[error("Unexpected response from storage provider: {0}")]
    UnexpectedResponse(String),

    #[error("Storage provider rejected the request: {0}")]
    Rejected(String),
}

/// Top-level error for all library operations
#[derive(Debug, Clone, Error)]
pub enum LibraryError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid file token: {0}")]
    InvalidFileToken(#[from] FileTokenError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] BookTitleError),

    #[error("Validation failed: {0}")]
    Validation(String),

    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Domain-level errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Unknown file token: {0}")]
    UnknownFileToken(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("File token already in use: {0}")]
    DuplicateFileToken(String),

    // Infrastructure errors
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
