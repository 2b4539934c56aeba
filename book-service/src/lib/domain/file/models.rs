use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::file::errors::FileTokenError;

/// Opaque identifier issued by the storage provider for an uploaded file.
///
/// Also the foreign key from a book to its file and the public identifier of
/// the book itself in the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileToken(String);

impl FileToken {
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `Empty` - Token is empty or whitespace
    /// * `TooLong` - Token longer than 128 characters
    pub fn new(token: String) -> Result<Self, FileTokenError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(FileTokenError::Empty);
        }
        if token.len() > Self::MAX_LENGTH {
            return Err(FileTokenError::TooLong {
                max: Self::MAX_LENGTH,
                actual: token.len(),
            });
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of pushing bytes to the storage provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub token: FileToken,
    pub download_page: String,
}

/// File metadata record kept in the document store.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: Uuid,
    pub token: FileToken,
    pub download_page: String,
    pub created_at: DateTime<Utc>,
}

impl From<UploadedFile> for StoredFile {
    fn from(uploaded: UploadedFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: uploaded.token,
            download_page: uploaded.download_page,
            created_at: Utc::now(),
        }
    }
}
