use thiserror::Error;

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookTitleError {
    #[error("Book title must not be empty")]
    Empty,

    #[error("Book title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}
