use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::{error::ApiError, state::AppState};

/// Rejects the request with 403 unless `Authorization` is exactly
/// `Bearer <API_KEY>`. The wrapped handler never runs on rejection.
pub async fn require_api_key<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    if is_authorized(request.headers(), state.expected_authorization()) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "rejected request with invalid API key"
    );
    ApiError::Unauthorized.into_response()
}

fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    match headers.get(AUTHORIZATION) {
        Some(value) => value.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}
