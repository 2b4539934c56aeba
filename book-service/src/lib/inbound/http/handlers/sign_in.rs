use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::TokensResponseData;
use crate::inbound::http::router::AppState;
use crate::library::errors::LibraryError;
use crate::library::ports::LibraryServicePort;
use crate::user::models::Credentials;
use crate::user::models::EmailAddress;

pub async fn sign_in<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<ApiSuccess<TokensResponseData>, ApiError> {
    // Unknown and malformed emails answer like a wrong password.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state
        .library_service
        .sign_in(Credentials::new(email, body.password))
        .await
        .map_err(|e| match e {
            LibraryError::UserNotFound(_) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}
