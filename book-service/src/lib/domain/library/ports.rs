use async_trait::async_trait;

use crate::book::models::Book;
use crate::book::models::BookChanges;
use crate::book::models::BookView;
use crate::book::models::CreateBookCommand;
use crate::book::models::UpdateBookCommand;
use crate::book::query::BookFilter;
use crate::book::query::BookSort;
use crate::book::query::NormalizedParams;
use crate::file::models::FileToken;
use crate::file::models::StoredFile;
use crate::file::models::UploadedFile;
use crate::library::errors::LibraryError;
use crate::library::errors::StorageError;
use crate::library::models::AuthTokens;
use crate::library::models::BookPage;
use crate::user::models::Credentials;
use crate::user::models::EmailAddress;
use crate::user::models::User;
use crate::user::models::UserId;

/// Port for library service operations.
#[async_trait]
pub trait LibraryServicePort: Send + Sync + 'static {
    /// Register a new user and sign them in.
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Internal` - Hashing or token signing failed
    /// * `Database` - Database operation failed
    async fn sign_up(&self, credentials: Credentials) -> Result<AuthTokens, LibraryError>;

    /// Authenticate with email and password.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Database` - Database operation failed
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthTokens, LibraryError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Refresh token is invalid, expired or an access token
    /// * `UserNotFound` - Subject no longer exists
    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, LibraryError>;

    /// Resolve an authenticated identity.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn find_user(&self, id: &UserId) -> Result<User, LibraryError>;

    /// Upload file content to the storage provider and record it.
    ///
    /// # Returns
    /// Provider-issued file token
    ///
    /// # Errors
    /// * `UploadFailed` - Any stage of the upload or the metadata write failed
    async fn upload_file(&self, content: Vec<u8>, filename: &str)
        -> Result<FileToken, LibraryError>;

    /// Create a book for `owner` from an uploaded file.
    ///
    /// # Errors
    /// * `UnknownFileToken` - File token does not reference an uploaded file
    /// * `DuplicateFileToken` - A book already uses this file
    async fn create_book(
        &self,
        owner: &UserId,
        command: CreateBookCommand,
    ) -> Result<FileToken, LibraryError>;

    /// Public view of one book.
    ///
    /// # Errors
    /// * `BookNotFound` - No book with this file token
    async fn get_book(&self, file_token: &FileToken) -> Result<BookView, LibraryError>;

    /// List books after normalizing the raw parameters.
    ///
    /// An empty filter email lists across all owners; otherwise only that
    /// user's books are listed.
    ///
    /// # Errors
    /// * `UserNotFound` - Filter email does not belong to a user
    async fn get_books(&self, filter: BookFilter, sort: BookSort)
        -> Result<BookPage, LibraryError>;

    /// Update title, description and/or file of a book.
    ///
    /// # Errors
    /// * `BookNotFound` - No book with this file token
    /// * `UnknownFileToken` - Replacement file token does not exist
    async fn update_book(
        &self,
        file_token: &FileToken,
        command: UpdateBookCommand,
    ) -> Result<Book, LibraryError>;

    /// Delete a book.
    ///
    /// # Errors
    /// * `BookNotFound` - No book with this file token
    async fn delete_book(&self, file_token: &FileToken) -> Result<(), LibraryError>;
}

/// Persistence operations for users, books and uploaded-file metadata.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateUser` - Email uniqueness constraint violated
    /// * `Database` - Database operation failed
    async fn create_user(&self, user: User) -> Result<User, LibraryError>;

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, LibraryError>;

    async fn find_user_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, LibraryError>;

    /// Persist metadata of an uploaded file.
    ///
    /// # Errors
    /// * `DuplicateFileToken` - Token already recorded
    /// * `Database` - Database operation failed
    async fn insert_file(&self, file: StoredFile) -> Result<StoredFile, LibraryError>;

    async fn find_file(&self, token: &FileToken) -> Result<Option<StoredFile>, LibraryError>;

    /// Persist a new book and link it into the owner's `book_ids`.
    ///
    /// # Errors
    /// * `DuplicateFileToken` - A book already uses this file token
    /// * `Database` - Database operation failed
    async fn insert_book(&self, book: Book) -> Result<Book, LibraryError>;

    async fn find_book(&self, file_token: &FileToken) -> Result<Option<Book>, LibraryError>;

    /// List books, optionally restricted to one owner.
    ///
    /// Text search applies when `params.search` is non-empty; ordering and
    /// paging follow the normalized parameters.
    async fn list_books(
        &self,
        owner: Option<UserId>,
        params: &NormalizedParams,
    ) -> Result<Vec<Book>, LibraryError>;

    /// Apply field changes to the book addressed by `file_token`.
    ///
    /// # Errors
    /// * `BookNotFound` - No matching book
    /// * `DuplicateFileToken` - New file token already used by another book
    async fn update_book(
        &self,
        file_token: &FileToken,
        changes: BookChanges,
    ) -> Result<Book, LibraryError>;

    /// # Errors
    /// * `BookNotFound` - No matching book
    async fn delete_book(&self, file_token: &FileToken) -> Result<(), LibraryError>;
}

/// Binary content storage at the third-party file host.
#[async_trait]
pub trait FileStorage: Send + Sync + 'static {
    /// Upload content and return the provider's token and download page.
    async fn upload(&self, content: Vec<u8>, filename: &str)
        -> Result<UploadedFile, StorageError>;

    /// Remove previously uploaded content.
    async fn delete(&self, token: &FileToken) -> Result<(), StorageError>;
}

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync + 'static {
    /// # Errors
    /// * `Internal` - The hashing primitive rejected the input
    fn hash_password(&self, password: &str) -> Result<String, LibraryError>;

    /// # Errors
    /// * `InvalidCredentials` - Password does not match the hash
    /// * `Internal` - Stored hash is unreadable
    fn verify_password(&self, password: &str, hash: &str) -> Result<(), LibraryError>;

    /// Spend the cost of one verification when there is no stored hash to
    /// check against, so an unknown email answers no faster than a known one.
    fn verify_without_hash(&self, password: &str);
}

/// Issuance of signed identity tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// # Errors
    /// * `Internal` - Signing failed
    fn issue_tokens(&self, user_id: &UserId) -> Result<AuthTokens, LibraryError>;

    /// # Errors
    /// * `InvalidToken` - Not a valid, unexpired refresh token
    fn validate_refresh_token(&self, token: &str) -> Result<UserId, LibraryError>;
}
