use std::sync::Arc;
use std::time::Duration;

use auth::TokenEngine;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_book::create_book;
use super::handlers::delete_book::delete_book;
use super::handlers::get_book::get_book;
use super::handlers::list_books::list_books;
use super::handlers::refresh_token::refresh_token;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::handlers::update_book::update_book;
use super::handlers::upload_file::upload_file;
use super::middleware::authorize;
use crate::library::ports::LibraryServicePort;

pub struct AppState<S: LibraryServicePort> {
    pub library_service: Arc<S>,
    pub tokens: Arc<TokenEngine>,
}

impl<S: LibraryServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            library_service: Arc::clone(&self.library_service),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Build the HTTP application.
///
/// Every matched route passes through [`authorize`], which decides per
/// method and path whether a bearer token is required.
pub fn create_router<S: LibraryServicePort>(
    library_service: Arc<S>,
    tokens: Arc<TokenEngine>,
    max_upload_bytes: usize,
) -> Router {
    let state = AppState {
        library_service,
        tokens: Arc::clone(&tokens),
    };

    let routes = Router::new()
        .route("/login", post(sign_in::<S>))
        .route("/register", post(sign_up::<S>))
        .route("/refresh", post(refresh_token::<S>))
        .route(
            "/files",
            post(upload_file::<S>).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/books", get(list_books::<S>).post(create_book::<S>))
        .route(
            "/books/:id",
            get(get_book::<S>)
                .put(update_book::<S>)
                .patch(update_book::<S>)
                .delete(delete_book::<S>),
        )
        .route_layer(middleware::from_fn_with_state(tokens, authorize));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
