use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::book::models::BookTitle;
use crate::book::models::CreateBookCommand;
use crate::file::models::FileToken;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;

/// HTTP request body for creating a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    #[serde(alias = "fileToken")]
    file_token: String,
    title: String,
    #[serde(default)]
    description: String,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, LibraryError> {
        let title = BookTitle::new(self.title)?;
        let file_token = FileToken::new(self.file_token)?;
        Ok(CreateBookCommand::new(title, self.description, file_token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBookResponseData {
    pub file_token: String,
}

pub async fn create_book<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<CreateBookResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .library_service
        .create_book(&user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateBookResponseData {
                    file_token: token.to_string(),
                },
            )
        })
}
