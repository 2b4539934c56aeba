use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokensResponseData;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

/// Exchange a refresh token for a fresh access/refresh pair.
pub async fn refresh_token<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<ApiSuccess<TokensResponseData>, ApiError> {
    state
        .library_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| match e {
            LibraryError::UserNotFound(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            _ => ApiError::from(e),
        })
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}
