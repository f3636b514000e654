//! HTTP gateway exposing CRUD over the `users` table, guarded by a static
//! bearer token.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod state;

use axum::{
    http::{header, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::user_handlers::{
    add_user, delete_user, get_user, get_user_by_email, get_user_id, get_users, test_connection,
    update_user,
};
use crate::middleware::require_api_key;
use crate::state::AppState;

/// Builds the full application router.
///
/// Every route sits behind the API key guard. CORS preflights are answered
/// by the outer CORS layer and never reach the guard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/test_connection", get(test_connection))
        .route("/api/users", get(get_users))
        .route("/api/add-user", post(add_user))
        .route("/api/get-user/:student_name", get(get_user))
        .route("/api/get-user-by-email/:email", get(get_user_by_email))
        .route("/api/update-user/:student_name", patch(update_user))
        .route("/api/delete-user/:id", delete(delete_user))
        .route("/api/get-user-id/:id", get(get_user_id))
        .route_layer(from_fn_with_state(state.clone(), require_api_key))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any)
                .expose_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}
