use std::sync::Arc;

use async_trait::async_trait;

use crate::book::models::Book;
use crate::book::models::BookChanges;
use crate::book::models::BookView;
use crate::book::models::CreateBookCommand;
use crate::book::models::UpdateBookCommand;
use crate::book::query::normalize;
use crate::book::query::BookFilter;
use crate::book::query::BookSort;
use crate::file::models::FileToken;
use crate::file::models::StoredFile;
use crate::library::errors::LibraryError;
use crate::library::models::AuthTokens;
use crate::library::models::BookPage;
use crate::library::ports::CredentialHasher;
use crate::library::ports::DocumentStore;
use crate::library::ports::FileStorage;
use crate::library::ports::LibraryServicePort;
use crate::library::ports::TokenIssuer;
use crate::user::models::Credentials;
use crate::user::models::EmailAddress;
use crate::user::models::User;
use crate::user::models::UserId;

/// Application service for the book-sharing use cases.
///
/// Orchestrates the four collaborator ports; holds no state of its own.
pub struct LibraryService<DS, FS, CH, TI>
where
    DS: DocumentStore,
    FS: FileStorage,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    store: Arc<DS>,
    storage: Arc<FS>,
    hasher: Arc<CH>,
    tokens: Arc<TI>,
}

impl<DS, FS, CH, TI> LibraryService<DS, FS, CH, TI>
where
    DS: DocumentStore,
    FS: FileStorage,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    /// Create a new library service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Users, books and file metadata persistence
    /// * `storage` - Third-party file host
    /// * `hasher` - Password hashing
    /// * `tokens` - Token issuance
    pub fn new(store: Arc<DS>, storage: Arc<FS>, hasher: Arc<CH>, tokens: Arc<TI>) -> Self {
        Self {
            store,
            storage,
            hasher,
            tokens,
        }
    }

    async fn require_file(&self, token: &FileToken) -> Result<StoredFile, LibraryError> {
        self.store
            .find_file(token)
            .await?
            .ok_or_else(|| LibraryError::UnknownFileToken(token.to_string()))
    }
}

#[async_trait]
impl<DS, FS, CH, TI> LibraryServicePort for LibraryService<DS, FS, CH, TI>
where
    DS: DocumentStore,
    FS: FileStorage,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    async fn sign_up(&self, credentials: Credentials) -> Result<AuthTokens, LibraryError> {
        let password_hash = self.hasher.hash_password(&credentials.password)?;

        // Email uniqueness is the store's unique index; no lookup beforehand.
        let user = self
            .store
            .create_user(User::register(credentials.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.tokens.issue_tokens(&user.id)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthTokens, LibraryError> {
        let Some(user) = self.store.find_user_by_email(&credentials.email).await? else {
            self.hasher.verify_without_hash(&credentials.password);
            return Err(LibraryError::UserNotFound(credentials.email.to_string()));
        };

        self.hasher
            .verify_password(&credentials.password, &user.password_hash)?;

        self.tokens.issue_tokens(&user.id)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, LibraryError> {
        let user_id = self.tokens.validate_refresh_token(refresh_token)?;
        let user = self.find_user(&user_id).await?;

        self.tokens.issue_tokens(&user.id)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, LibraryError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| LibraryError::UserNotFound(id.to_string()))
    }

    async fn upload_file(
        &self,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<FileToken, LibraryError> {
        let size = content.len();
        let uploaded = self
            .storage
            .upload(content, filename)
            .await
            .map_err(|e| {
                tracing::error!(filename, error = %e, "Upload to storage provider failed");
                LibraryError::UploadFailed(e.to_string())
            })?;

        let token = uploaded.token.clone();
        if let Err(e) = self.store.insert_file(StoredFile::from(uploaded)).await {
            tracing::error!(
                file_token = %token,
                error = %e,
                "Recording uploaded file failed, removing it from storage"
            );
            if let Err(cleanup) = self.storage.delete(&token).await {
                tracing::error!(
                    file_token = %token,
                    error = %cleanup,
                    "Compensating delete failed, file is orphaned at the provider"
                );
            }
            return Err(LibraryError::UploadFailed(e.to_string()));
        }

        tracing::info!(file_token = %token, size, "File uploaded");
        Ok(token)
    }

    async fn create_book(
        &self,
        owner: &UserId,
        command: CreateBookCommand,
    ) -> Result<FileToken, LibraryError> {
        let file = self.require_file(&command.file_token).await?;

        let book = self.store.insert_book(Book::new(command, *owner, &file)).await?;

        tracing::info!(book_id = %book.id, owner = %owner, "Book created");
        Ok(book.file_token)
    }

    async fn get_book(&self, file_token: &FileToken) -> Result<BookView, LibraryError> {
        self.store
            .find_book(file_token)
            .await?
            .map(|book| BookView::from(&book))
            .ok_or_else(|| LibraryError::BookNotFound(file_token.to_string()))
    }

    async fn get_books(
        &self,
        filter: BookFilter,
        sort: BookSort,
    ) -> Result<BookPage, LibraryError> {
        let params = normalize(&filter, &sort);

        let owner = if params.is_public() {
            None
        } else {
            let email = EmailAddress::new(params.email.clone())?;
            let user = self
                .store
                .find_user_by_email(&email)
                .await?
                .ok_or_else(|| LibraryError::UserNotFound(params.email.clone()))?;
            Some(user.id)
        };

        let books = self.store.list_books(owner, &params).await?;

        Ok(BookPage { books, params })
    }

    async fn update_book(
        &self,
        file_token: &FileToken,
        command: UpdateBookCommand,
    ) -> Result<Book, LibraryError> {
        if command.is_empty() {
            return Err(LibraryError::Validation(
                "at least one of title, description or file_token is required".to_string(),
            ));
        }

        let mut changes = BookChanges {
            title: command.title,
            description: command.description,
            ..Default::default()
        };

        if let Some(new_token) = command.file_token {
            let file = self.require_file(&new_token).await?;
            changes.url = Some(file.download_page);
            changes.file_token = Some(new_token);
        }

        self.store.update_book(file_token, changes).await
    }

    async fn delete_book(&self, file_token: &FileToken) -> Result<(), LibraryError> {
        self.store.delete_book(file_token).await?;

        tracing::info!(file_token = %file_token, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use auth::PasswordHasher;
    use auth::TokenEngine;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::book::models::BookTitle;
    use crate::book::query::NormalizedParams;
    use crate::book::query::SortField;
    use crate::file::models::UploadedFile;
    use crate::library::errors::StorageError;
    use crate::outbound::credentials::Argon2CredentialHasher;
    use crate::outbound::credentials::JwtTokenIssuer;

    mock! {
        pub TestDocumentStore {}

        #[async_trait]
        impl DocumentStore for TestDocumentStore {
            async fn create_user(&self, user: User) -> Result<User, LibraryError>;
            async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, LibraryError>;
            async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, LibraryError>;
            async fn insert_file(&self, file: StoredFile) -> Result<StoredFile, LibraryError>;
            async fn find_file(&self, token: &FileToken) -> Result<Option<StoredFile>, LibraryError>;
            async fn insert_book(&self, book: Book) -> Result<Book, LibraryError>;
            async fn find_book(&self, file_token: &FileToken) -> Result<Option<Book>, LibraryError>;
            async fn list_books(&self, owner: Option<UserId>, params: &NormalizedParams) -> Result<Vec<Book>, LibraryError>;
            async fn update_book(&self, file_token: &FileToken, changes: BookChanges) -> Result<Book, LibraryError>;
            async fn delete_book(&self, file_token: &FileToken) -> Result<(), LibraryError>;
        }
    }

    mock! {
        pub TestFileStorage {}

        #[async_trait]
        impl FileStorage for TestFileStorage {
            async fn upload(&self, content: Vec<u8>, filename: &str) -> Result<UploadedFile, StorageError>;
            async fn delete(&self, token: &FileToken) -> Result<(), StorageError>;
        }
    }

    mock! {
        pub TestCredentialHasher {}

        impl CredentialHasher for TestCredentialHasher {
            fn hash_password(&self, password: &str) -> Result<String, LibraryError>;
            fn verify_password(&self, password: &str, hash: &str) -> Result<(), LibraryError>;
            fn verify_without_hash(&self, password: &str);
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    type TestService = LibraryService<
        MockTestDocumentStore,
        MockTestFileStorage,
        Argon2CredentialHasher,
        JwtTokenIssuer,
    >;

    fn token_engine() -> Arc<TokenEngine> {
        Arc::new(TokenEngine::new(
            SECRET,
            Duration::minutes(15),
            Duration::days(7),
        ))
    }

    fn service(store: MockTestDocumentStore, storage: MockTestFileStorage) -> TestService {
        let hasher = PasswordHasher::with_params(8 * 1024, 1, 1).unwrap();
        LibraryService::new(
            Arc::new(store),
            Arc::new(storage),
            Arc::new(Argon2CredentialHasher::new(hasher)),
            Arc::new(JwtTokenIssuer::new(token_engine())),
        )
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::new(
            EmailAddress::new(email.to_string()).unwrap(),
            password.to_string(),
        )
    }

    fn file_token(token: &str) -> FileToken {
        FileToken::new(token.to_string()).unwrap()
    }

    fn stored_file(token: &str, page: &str) -> StoredFile {
        StoredFile::from(UploadedFile {
            token: file_token(token),
            download_page: page.to_string(),
        })
    }

    fn book(token: &str, owner: UserId) -> Book {
        let file = stored_file(token, "https://gofile.io/d/abc");
        Book::new(
            CreateBookCommand::new(
                BookTitle::new("Dune".to_string()).unwrap(),
                "Spice".to_string(),
                file.token.clone(),
            ),
            owner,
            &file,
        )
    }

    fn user(email: &str) -> User {
        User::register(
            EmailAddress::new(email.to_string()).unwrap(),
            "$argon2id$unused".to_string(),
        )
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_yields_same_subject() {
        let mut store = MockTestDocumentStore::new();
        let saved: Arc<Mutex<Option<User>>> = Arc::new(Mutex::new(None));

        let on_create = Arc::clone(&saved);
        store
            .expect_create_user()
            .withf(|user| {
                user.email.as_str() == "a@x.com" && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(move |user| {
                *on_create.lock().unwrap() = Some(user.clone());
                Ok(user)
            });

        let on_find = Arc::clone(&saved);
        store
            .expect_find_user_by_email()
            .times(1)
            .returning(move |_| Ok(on_find.lock().unwrap().clone()));

        let service = service(store, MockTestFileStorage::new());

        let signed_up = service.sign_up(credentials("a@x.com", "pw1")).await.unwrap();
        let signed_in = service.sign_in(credentials("a@x.com", "pw1")).await.unwrap();

        let user_id = saved.lock().unwrap().as_ref().unwrap().id.to_string();
        let engine = token_engine();
        assert_eq!(
            engine.validate_access_token(&signed_up.access_token),
            Ok(user_id.clone())
        );
        assert_eq!(
            engine.validate_access_token(&signed_in.access_token),
            Ok(user_id.clone())
        );
        assert_eq!(
            engine.validate_refresh_token(&signed_in.refresh_token),
            Ok(user_id)
        );
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_create_user()
            .times(1)
            .returning(|user| Err(LibraryError::DuplicateUser(user.email.to_string())));
        store.expect_find_user_by_email().times(0);

        let service = service(store, MockTestFileStorage::new());

        let result = service.sign_up(credentials("a@x.com", "pw1")).await;
        assert!(matches!(result, Err(LibraryError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let hash = PasswordHasher::with_params(8 * 1024, 1, 1)
            .unwrap()
            .hash("pw1")
            .unwrap();
        let mut existing = user("a@x.com");
        existing.password_hash = hash;

        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = service(store, MockTestFileStorage::new());

        let result = service.sign_in(credentials("a@x.com", "wrong")).await;
        assert!(matches!(result, Err(LibraryError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(store, MockTestFileStorage::new());

        let result = service.sign_in(credentials("nobody@x.com", "pw1")).await;
        assert!(matches!(result, Err(LibraryError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user_still_pays_for_verification() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let mut hasher = MockTestCredentialHasher::new();
        hasher
            .expect_verify_without_hash()
            .withf(|password| password == "pw1")
            .times(1)
            .return_const(());
        hasher.expect_verify_password().times(0);

        let service = LibraryService::new(
            Arc::new(store),
            Arc::new(MockTestFileStorage::new()),
            Arc::new(hasher),
            Arc::new(JwtTokenIssuer::new(token_engine())),
        );

        let result = service.sign_in(credentials("nobody@x.com", "pw1")).await;
        assert!(matches!(result, Err(LibraryError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair() {
        let existing = user("a@x.com");
        let user_id = existing.id;
        let refresh_token = token_engine()
            .issue_refresh_token(&user_id.to_string())
            .unwrap();

        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = service(store, MockTestFileStorage::new());

        let tokens = service.refresh(&refresh_token).await.unwrap();
        assert_eq!(
            token_engine().validate_access_token(&tokens.access_token),
            Ok(user_id.to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let access_token = token_engine()
            .issue_access_token(&UserId::new().to_string())
            .unwrap();

        let mut store = MockTestDocumentStore::new();
        store.expect_find_user_by_id().times(0);

        let service = service(store, MockTestFileStorage::new());

        let result = service.refresh(&access_token).await;
        assert!(matches!(result, Err(LibraryError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_upload_file_records_metadata() {
        let mut storage = MockTestFileStorage::new();
        storage
            .expect_upload()
            .withf(|content, filename| {
                content == b"%PDF-1.7" && filename.to_string() == "dune.pdf"
            })
            .times(1)
            .returning(|_, _| {
                Ok(UploadedFile {
                    token: FileToken::new("f1".to_string()).unwrap(),
                    download_page: "https://gofile.io/d/f1".to_string(),
                })
            });
        storage.expect_delete().times(0);

        let mut store = MockTestDocumentStore::new();
        store
            .expect_insert_file()
            .withf(|file| {
                file.token.as_str() == "f1" && file.download_page == "https://gofile.io/d/f1"
            })
            .times(1)
            .returning(Ok);

        let service = service(store, storage);

        let token = service
            .upload_file(b"%PDF-1.7".to_vec(), "dune.pdf")
            .await
            .unwrap();
        assert_eq!(token.as_str(), "f1");
    }

    #[tokio::test]
    async fn test_upload_file_provider_failure() {
        let mut storage = MockTestFileStorage::new();
        storage
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(StorageError::Request("connection refused".to_string())));

        let mut store = MockTestDocumentStore::new();
        store.expect_insert_file().times(0);

        let service = service(store, storage);

        let result = service.upload_file(b"%PDF".to_vec(), "a.pdf").await;
        assert!(matches!(result, Err(LibraryError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_upload_file_metadata_failure_deletes_upload() {
        let mut storage = MockTestFileStorage::new();
        storage.expect_upload().times(1).returning(|_, _| {
            Ok(UploadedFile {
                token: FileToken::new("f1".to_string()).unwrap(),
                download_page: "https://gofile.io/d/f1".to_string(),
            })
        });
        storage
            .expect_delete()
            .withf(|token| token.as_str() == "f1")
            .times(1)
            .returning(|_| Ok(()));

        let mut store = MockTestDocumentStore::new();
        store
            .expect_insert_file()
            .times(1)
            .returning(|_| Err(LibraryError::Database("connection reset".to_string())));

        let service = service(store, storage);

        let result = service.upload_file(b"%PDF".to_vec(), "a.pdf").await;
        assert!(matches!(result, Err(LibraryError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_create_book_unknown_file_token() {
        let mut store = MockTestDocumentStore::new();
        store.expect_find_file().times(1).returning(|_| Ok(None));
        store.expect_insert_book().times(0);

        let service = service(store, MockTestFileStorage::new());

        let command = CreateBookCommand::new(
            BookTitle::new("Dune".to_string()).unwrap(),
            "Spice".to_string(),
            file_token("missing"),
        );
        let result = service.create_book(&UserId::new(), command).await;
        assert!(matches!(result, Err(LibraryError::UnknownFileToken(_))));
    }

    #[tokio::test]
    async fn test_create_book_copies_download_page() {
        let owner = UserId::new();

        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_file()
            .times(1)
            .returning(|_| Ok(Some(stored_file("f1", "https://gofile.io/d/f1"))));
        store
            .expect_insert_book()
            .withf(move |book| {
                book.owner == owner
                    && book.url == "https://gofile.io/d/f1"
                    && book.file_token.as_str() == "f1"
                    && book.title.as_str() == "Dune"
            })
            .times(1)
            .returning(Ok);

        let service = service(store, MockTestFileStorage::new());

        let command = CreateBookCommand::new(
            BookTitle::new("Dune".to_string()).unwrap(),
            "Spice".to_string(),
            file_token("f1"),
        );
        let token = service.create_book(&owner, command).await.unwrap();
        assert_eq!(token.as_str(), "f1");
    }

    #[tokio::test]
    async fn test_get_book_view() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_book()
            .times(1)
            .returning(|token| Ok(Some(book(token.as_str(), UserId::new()))));

        let service = service(store, MockTestFileStorage::new());

        let view = service.get_book(&file_token("f1")).await.unwrap();
        assert_eq!(view.file_url, "https://gofile.io/d/abc");
        assert_eq!(view.title, "Dune");
        assert_eq!(view.description, "Spice");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut store = MockTestDocumentStore::new();
        store.expect_find_book().times(1).returning(|_| Ok(None));

        let service = service(store, MockTestFileStorage::new());

        let result = service.get_book(&file_token("nope")).await;
        assert!(matches!(result, Err(LibraryError::BookNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_books_public_listing_normalizes() {
        let mut store = MockTestDocumentStore::new();
        store.expect_find_user_by_email().times(0);
        store
            .expect_list_books()
            .withf(|owner, params| {
                owner.is_none()
                    && params.limit == 100
                    && params.sort_field == SortField::Title
                    && params.direction.sign() == 1
                    && params.search == "dune"
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = service(store, MockTestFileStorage::new());

        let page = service
            .get_books(
                BookFilter::new("", "dune"),
                BookSort {
                    sort_field: "bogus".to_string(),
                    direction: "bogus".to_string(),
                    limit: 500,
                    offset: 0,
                },
            )
            .await
            .unwrap();

        assert!(page.books.is_empty());
        assert_eq!(page.params.limit, 100);
    }

    #[tokio::test]
    async fn test_get_books_owner_scoped() {
        let owner = user("a@x.com");
        let owner_id = owner.id;

        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_email()
            .withf(|email| email.as_str() == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(owner.clone())));
        store
            .expect_list_books()
            .withf(move |owner, params| *owner == Some(owner_id) && params.limit == 10)
            .times(1)
            .returning(move |_, _| Ok(vec![book("f1", owner_id)]));

        let service = service(store, MockTestFileStorage::new());

        let page = service
            .get_books(BookFilter::new("a@x.com", ""), BookSort::default())
            .await
            .unwrap();
        assert_eq!(page.books.len(), 1);
        assert_eq!(page.books[0].owner, owner_id);
    }

    #[tokio::test]
    async fn test_get_books_unknown_owner() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_user_by_email()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_list_books().times(0);

        let service = service(store, MockTestFileStorage::new());

        let result = service
            .get_books(BookFilter::new("ghost@x.com", ""), BookSort::default())
            .await;
        assert!(matches!(result, Err(LibraryError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_book_unknown_replacement_file() {
        let mut store = MockTestDocumentStore::new();
        store.expect_find_file().times(1).returning(|_| Ok(None));
        store.expect_update_book().times(0);

        let service = service(store, MockTestFileStorage::new());

        let command = UpdateBookCommand {
            file_token: Some(file_token("missing")),
            ..Default::default()
        };
        let result = service.update_book(&file_token("f1"), command).await;
        assert!(matches!(result, Err(LibraryError::UnknownFileToken(_))));
    }

    #[tokio::test]
    async fn test_update_book_replacement_file_sets_url() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_find_file()
            .times(1)
            .returning(|_| Ok(Some(stored_file("f2", "https://gofile.io/d/f2"))));
        store
            .expect_update_book()
            .withf(|token, changes| {
                token.as_str() == "f1"
                    && changes.file_token.as_ref().map(|t| t.as_str()) == Some("f2")
                    && changes.url.as_deref() == Some("https://gofile.io/d/f2")
                    && changes.title.is_none()
            })
            .times(1)
            .returning(|_, changes| {
                let mut updated = book("f1", UserId::new());
                changes.apply(&mut updated);
                Ok(updated)
            });

        let service = service(store, MockTestFileStorage::new());

        let command = UpdateBookCommand {
            file_token: Some(file_token("f2")),
            ..Default::default()
        };
        let updated = service.update_book(&file_token("f1"), command).await.unwrap();
        assert_eq!(updated.file_token.as_str(), "f2");
        assert_eq!(updated.url, "https://gofile.io/d/f2");
    }

    #[tokio::test]
    async fn test_update_book_requires_a_field() {
        let mut store = MockTestDocumentStore::new();
        store.expect_update_book().times(0);

        let service = service(store, MockTestFileStorage::new());

        let result = service
            .update_book(&file_token("f1"), UpdateBookCommand::default())
            .await;
        assert!(matches!(result, Err(LibraryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut store = MockTestDocumentStore::new();
        store
            .expect_delete_book()
            .times(1)
            .returning(|token| Err(LibraryError::BookNotFound(token.to_string())));

        let service = service(store, MockTestFileStorage::new());

        let result = service.delete_book(&file_token("nope")).await;
        assert!(matches!(result, Err(LibraryError::BookNotFound(_))));
    }
}
