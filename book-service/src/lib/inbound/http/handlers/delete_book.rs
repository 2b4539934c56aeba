use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::file::models::FileToken;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;

pub async fn delete_book<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let file_token = FileToken::new(id).map_err(LibraryError::from)?;

    state
        .library_service
        .delete_book(&file_token)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
