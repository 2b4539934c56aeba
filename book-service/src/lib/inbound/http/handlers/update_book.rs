use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::book::models::BookTitle;
use crate::book::models::UpdateBookCommand;
use crate::file::models::FileToken;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;

/// HTTP request body for updating a book (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "fileToken")]
    pub file_token: Option<String>,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, LibraryError> {
        // Validation happens here - errors are automatically converted via #[from]
        let title = self.title.map(BookTitle::new).transpose()?;
        let file_token = self.file_token.map(FileToken::new).transpose()?;

        Ok(UpdateBookCommand {
            title,
            description: self.description,
            file_token,
        })
    }
}

/// Serves both `PUT` and `PATCH`; absent fields are left unchanged.
pub async fn update_book<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let file_token = FileToken::new(id).map_err(LibraryError::from)?;
    let command = req.try_into_command()?;

    state
        .library_service
        .update_book(&file_token, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
