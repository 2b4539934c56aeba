use std::sync::Arc;

use auth::TokenEngine;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::user::models::UserId;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// How a route treats the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Never inspected.
    Public,
    /// Admitted anonymously without a header; a present header must validate.
    Optional,
    /// A valid access token is mandatory.
    Required,
}

pub fn access_for(method: &Method, path: &str) -> Access {
    match (method, path) {
        (&Method::POST, "/login" | "/register" | "/refresh") => Access::Public,
        (&Method::GET, "/books") => Access::Optional,
        _ => Access::Required,
    }
}

/// Middleware that validates bearer tokens and adds the caller to request
/// extensions. Rejections never reach the handler.
pub async fn authorize(
    State(tokens): State<Arc<TokenEngine>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = access_for(req.method(), req.uri().path());
    if access == Access::Public {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned));

    let header = match header {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header".to_string(),
            ))
        }
        None if access == Access::Optional => return Ok(next.run(req).await),
        None => {
            return Err(ApiError::Unauthorized(
                "Missing Authorization header".to_string(),
            ))
        }
    };

    let token = bearer_token(&header)?;

    let subject = tokens.validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, path = %req.uri().path(), "Token validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::Unauthorized("Invalid token format".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn bearer_token(header: &str) -> Result<&str, ApiError> {
    let (scheme, token) = header.split_once(' ').unwrap_or_default();
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        ));
    }

    Ok(token)
}
