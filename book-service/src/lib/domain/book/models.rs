use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::book::errors::BookTitleError;
use crate::file::models::FileToken;
use crate::file::models::StoredFile;
use crate::user::models::UserId;

/// Shared book record.
///
/// Addressed externally by its file token; `id` is internal and only used to
/// link books to their owner's `book_ids`.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub description: String,
    pub file_token: FileToken,
    pub owner: UserId,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Build a new book for `owner` pointing at an uploaded file.
    pub fn new(command: CreateBookCommand, owner: UserId, file: &StoredFile) -> Self {
        Self {
            id: BookId::new(),
            title: command.title,
            description: command.description,
            file_token: file.token.clone(),
            owner,
            url: file.download_page.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title value type
///
/// Trimmed, non-empty and at most 256 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 256;

    /// # Errors
    /// * `Empty` - Title is empty or whitespace
    /// * `TooLong` - Title longer than 256 characters
    pub fn new(title: String) -> Result<Self, BookTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();
        if length == 0 {
            Err(BookTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(BookTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a book from an already uploaded file.
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: BookTitle,
    pub description: String,
    pub file_token: FileToken,
}

impl CreateBookCommand {
    pub fn new(title: BookTitle, description: String, file_token: FileToken) -> Self {
        Self {
            title,
            description,
            file_token,
        }
    }
}

/// Command to update an existing book.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateBookCommand {
    pub title: Option<BookTitle>,
    pub description: Option<String>,
    pub file_token: Option<FileToken>,
}

impl UpdateBookCommand {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.file_token.is_none()
    }
}

/// Field changes applied by the document store.
///
/// Resolved from an [`UpdateBookCommand`] once a replacement file token has
/// been checked; `url` is set whenever `file_token` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<BookTitle>,
    pub description: Option<String>,
    pub file_token: Option<FileToken>,
    pub url: Option<String>,
}

impl BookChanges {
    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(description) = &self.description {
            book.description = description.clone();
        }
        if let Some(file_token) = &self.file_token {
            book.file_token = file_token.clone();
        }
        if let Some(url) = &self.url {
            book.url = url.clone();
        }
    }
}

/// Public view of a single book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub file_url: String,
    pub title: String,
    pub description: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            file_url: book.url.clone(),
            title: book.title.as_str().to_string(),
            description: book.description.clone(),
        }
    }
}
