use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
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

/// Register and sign in at once.
///
/// The access token is also echoed as an `Authorization` response header.
pub async fn sign_up<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(HeaderMap, ApiSuccess<TokensResponseData>), ApiError> {
    let credentials = body.try_into_credentials()?;

    let tokens = state.library_service.sign_up(credentials).await?;

    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", tokens.access_token))
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
    headers.insert(AUTHORIZATION, bearer);

    Ok((
        headers,
        ApiSuccess::new(StatusCode::CREATED, tokens.into()),
    ))
}

impl CredentialsRequest {
    fn try_into_credentials(self) -> Result<Credentials, LibraryError> {
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(LibraryError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        Ok(Credentials::new(email, self.password))
    }
}
