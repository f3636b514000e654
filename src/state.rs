use std::sync::Arc;

use crate::db::DbPool;

/// Shared context handed to every handler and to the auth guard.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    expected_authorization: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, api_key: &str) -> Self {
        Self {
            pool,
            expected_authorization: format!("Bearer {}", api_key).into(),
        }
    }

    /// The exact `Authorization` header value the guard accepts.
    pub fn expected_authorization(&self) -> &str {
        &self.expected_authorization
    }
}
