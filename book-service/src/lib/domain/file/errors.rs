use thiserror::Error;

/// Error for FileToken validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileTokenError {
    #[error("File token must not be empty")]
    Empty,

    #[error("File token too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}
