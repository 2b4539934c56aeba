use std::fmt;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::book::models::Book;
use crate::library::errors::LibraryError;
use crate::library::models::AuthTokens;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod refresh_token;
pub mod sign_in;
pub mod sign_up;
pub mod update_book;
pub mod upload_file;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    PayloadTooLarge(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::UserNotFound(_)
            | LibraryError::BookNotFound(_)
            | LibraryError::UnknownFileToken(_) => ApiError::NotFound(err.to_string()),
            LibraryError::DuplicateUser(_) | LibraryError::DuplicateFileToken(_) => {
                ApiError::Conflict(err.to_string())
            }
            LibraryError::InvalidCredentials | LibraryError::InvalidToken(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            LibraryError::InvalidUserId(_)
            | LibraryError::InvalidEmail(_)
            | LibraryError::InvalidFileToken(_)
            | LibraryError::InvalidTitle(_)
            | LibraryError::Validation(_) => ApiError::UnprocessableEntity(err.to_string()),
            LibraryError::UploadFailed(_) => ApiError::BadGateway(err.to_string()),
            LibraryError::Database(_) | LibraryError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Request body shared by sign-up and sign-in.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokensResponseData {
    pub token: String,
    pub refresh_token: String,
}

impl From<AuthTokens> for TokensResponseData {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

/// Full book representation returned by listing and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub file_token: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            file_token: book.file_token.to_string(),
            title: book.title.as_str().to_string(),
            description: book.description.clone(),
            url: book.url.clone(),
            owner_id: book.owner.to_string(),
            created_at: book.created_at,
        }
    }
}
