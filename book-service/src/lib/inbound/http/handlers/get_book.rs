use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::book::models::BookView;
use crate::file::models::FileToken;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetBookResponseData {
    #[serde(rename = "fileURL")]
    pub file_url: String,
    pub title: String,
    pub description: String,
}

impl From<BookView> for GetBookResponseData {
    fn from(view: BookView) -> Self {
        Self {
            file_url: view.file_url,
            title: view.title,
            description: view.description,
        }
    }
}

pub async fn get_book<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<GetBookResponseData>, ApiError> {
    let file_token = FileToken::new(id).map_err(LibraryError::from)?;

    state
        .library_service
        .get_book(&file_token)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}
