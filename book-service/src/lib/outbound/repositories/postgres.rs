use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::book::models::Book;
use crate::book::models::BookChanges;
use crate::book::models::BookId;
use crate::book::models::BookTitle;
use crate::book::query::NormalizedParams;
use crate::book::query::SortDirection;
use crate::book::query::SortField;
use crate::file::models::FileToken;
use crate::file::models::StoredFile;
use crate::library::errors::LibraryError;
use crate::library::ports::DocumentStore;
use crate::user::models::EmailAddress;
use crate::user::models::User;
use crate::user::models::UserId;

const BOOK_COLUMNS: &str = "id, title, description, file_token, owner_id, url, created_at";

pub struct PostgresDocumentStore {
    pool: PgPool,
    operation_timeout: Duration,
}

impl PostgresDocumentStore {
    /// # Arguments
    /// * `pool` - Connection pool, migrations already applied
    /// * `operation_timeout` - Deadline for each store operation
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> Result<T, LibraryError>
    where
        F: Future<Output = Result<T, LibraryError>> + Send,
    {
        match tokio::time::timeout(self.operation_timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Document store operation timed out"
                );
                Err(LibraryError::Database(format!("{} timed out", operation)))
            }
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    book_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = LibraryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            book_ids: row.book_ids.into_iter().map(BookId).collect(),
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    token: String,
    download_page: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FileRow> for StoredFile {
    type Error = LibraryError;

    fn try_from(row: FileRow) -> Result<Self, Self::Error> {
        Ok(StoredFile {
            id: row.id,
            token: FileToken::new(row.token)?,
            download_page: row.download_page,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    description: String,
    file_token: String,
    owner_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = LibraryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(row.id),
            title: BookTitle::new(row.title)?,
            description: row.description,
            file_token: FileToken::new(row.file_token)?,
            owner: UserId(row.owner_id),
            url: row.url,
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> LibraryError {
    LibraryError::Database(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error, constraint: &str) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_unique_violation() && db_err.constraint() == Some(constraint))
        .unwrap_or(false)
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}

fn order_column(field: SortField) -> &'static str {
    match field {
        SortField::Title => "title",
        SortField::Date => "created_at",
    }
}

fn order_direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    }
}

/// Build the listing query. Sort column and direction come from closed
/// enums; every user-supplied value is bound.
fn list_books_query(
    owner: Option<UserId>,
    params: &NormalizedParams,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM books WHERE TRUE", BOOK_COLUMNS));

    if let Some(owner) = owner {
        builder.push(" AND owner_id = ").push_bind(owner.0);
    }

    // A title matches when it contains any one of the search words.
    if !params.search.is_empty() {
        builder
            .push(" AND search @@ to_tsquery('english', replace(plainto_tsquery('english', ")
            .push_bind(params.search.clone())
            .push(")::text, '&', '|'))");
    }

    builder
        .push(" ORDER BY ")
        .push(order_column(params.sort_field))
        .push(" ")
        .push(order_direction(params.direction))
        .push(", id ASC");

    // Negative offsets pass through normalization untouched; Postgres rejects them.
    builder
        .push(" LIMIT ")
        .push_bind(params.limit)
        .push(" OFFSET ")
        .push_bind(params.offset.max(0));

    builder
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn create_user(&self, user: User) -> Result<User, LibraryError> {
        self.bounded("create_user", async move {
            let book_ids: Vec<Uuid> = user.book_ids.iter().map(|id| id.0).collect();

            sqlx::query(
                r#"
                INSERT INTO users (id, email, password_hash, book_ids, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(user.id.0)
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(&book_ids)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "users_email_key") {
                    return LibraryError::DuplicateUser(user.email.to_string());
                }
                database_error(e)
            })?;

            Ok(user)
        })
        .await
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, LibraryError> {
        self.bounded("find_user_by_id", async move {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, email, password_hash, book_ids, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

            row.map(User::try_from).transpose()
        })
        .await
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, LibraryError> {
        self.bounded("find_user_by_email", async move {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, email, password_hash, book_ids, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

            row.map(User::try_from).transpose()
        })
        .await
    }

    async fn insert_file(&self, file: StoredFile) -> Result<StoredFile, LibraryError> {
        self.bounded("insert_file", async move {
            sqlx::query(
                r#"
                INSERT INTO files (id, token, download_page, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(file.id)
            .bind(file.token.as_str())
            .bind(&file.download_page)
            .bind(file.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "files_token_key") {
                    return LibraryError::DuplicateFileToken(file.token.to_string());
                }
                database_error(e)
            })?;

            Ok(file)
        })
        .await
    }

    async fn find_file(&self, token: &FileToken) -> Result<Option<StoredFile>, LibraryError> {
        self.bounded("find_file", async move {
            let row = sqlx::query_as::<_, FileRow>(
                r#"
                SELECT id, token, download_page, created_at
                FROM files
                WHERE token = $1
                "#,
            )
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

            row.map(StoredFile::try_from).transpose()
        })
        .await
    }

    async fn insert_book(&self, book: Book) -> Result<Book, LibraryError> {
        self.bounded("insert_book", async move {
            let mut tx = self.pool.begin().await.map_err(database_error)?;

            sqlx::query(
                r#"
                INSERT INTO books (id, title, description, file_token, owner_id, url, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(book.id.0)
            .bind(book.title.as_str())
            .bind(&book.description)
            .bind(book.file_token.as_str())
            .bind(book.owner.0)
            .bind(&book.url)
            .bind(book.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "books_file_token_key") {
                    return LibraryError::DuplicateFileToken(book.file_token.to_string());
                }
                if is_foreign_key_violation(&e) {
                    return LibraryError::UserNotFound(book.owner.to_string());
                }
                database_error(e)
            })?;

            sqlx::query(
                r#"
                UPDATE users
                SET book_ids = array_append(book_ids, $1)
                WHERE id = $2
                "#,
            )
            .bind(book.id.0)
            .bind(book.owner.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

            tx.commit().await.map_err(database_error)?;

            Ok(book)
        })
        .await
    }

    async fn find_book(&self, file_token: &FileToken) -> Result<Option<Book>, LibraryError> {
        self.bounded("find_book", async move {
            let row = sqlx::query_as::<_, BookRow>(&format!(
                "SELECT {} FROM books WHERE file_token = $1",
                BOOK_COLUMNS
            ))
            .bind(file_token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

            row.map(Book::try_from).transpose()
        })
        .await
    }

    async fn list_books(
        &self,
        owner: Option<UserId>,
        params: &NormalizedParams,
    ) -> Result<Vec<Book>, LibraryError> {
        self.bounded("list_books", async move {
            let mut query = list_books_query(owner, params);

            let rows = query
                .build_query_as::<BookRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

            rows.into_iter().map(Book::try_from).collect()
        })
        .await
    }

    async fn update_book(
        &self,
        file_token: &FileToken,
        changes: BookChanges,
    ) -> Result<Book, LibraryError> {
        self.bounded("update_book", async move {
            let row = sqlx::query_as::<_, BookRow>(&format!(
                r#"
                UPDATE books
                SET title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    file_token = COALESCE($4, file_token),
                    url = COALESCE($5, url)
                WHERE file_token = $1
                RETURNING {}
                "#,
                BOOK_COLUMNS
            ))
            .bind(file_token.as_str())
            .bind(changes.title.as_ref().map(|t| t.as_str().to_string()))
            .bind(changes.description.clone())
            .bind(changes.file_token.as_ref().map(|t| t.as_str().to_string()))
            .bind(changes.url.clone())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "books_file_token_key") {
                    let token = changes
                        .file_token
                        .as_ref()
                        .map(|t| t.to_string())
                        .unwrap_or_default();
                    return LibraryError::DuplicateFileToken(token);
                }
                database_error(e)
            })?;

            match row {
                Some(row) => Book::try_from(row),
                None => Err(LibraryError::BookNotFound(file_token.to_string())),
            }
        })
        .await
    }

    async fn delete_book(&self, file_token: &FileToken) -> Result<(), LibraryError> {
        self.bounded("delete_book", async move {
            let mut tx = self.pool.begin().await.map_err(database_error)?;

            let deleted = sqlx::query_as::<_, (Uuid, Uuid)>(
                r#"
                DELETE FROM books
                WHERE file_token = $1
                RETURNING id, owner_id
                "#,
            )
            .bind(file_token.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error)?;

            let Some((book_id, owner_id)) = deleted else {
                return Err(LibraryError::BookNotFound(file_token.to_string()));
            };

            sqlx::query(
                r#"
                UPDATE users
                SET book_ids = array_remove(book_ids, $1)
                WHERE id = $2
                "#,
            )
            .bind(book_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

            tx.commit().await.map_err(database_error)?;

            Ok(())
        })
        .await
    }
}
