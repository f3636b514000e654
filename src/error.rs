use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a route can report. The `Display` text is what the client
/// sees in the `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized. Invalid API key")]
    Unauthorized,

    #[error("Invalid JSON data")]
    InvalidJson,

    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    InvalidPath(String),

    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Database(#[from] diesel::result::Error),

    #[error("{0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("{0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::InvalidJson | ApiError::Validation(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::InvalidJson.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation("At least one field is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Database(diesel::result::Error::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_pass_their_message_through() {
        let err = ApiError::from(diesel::result::Error::NotFound);
        assert_eq!(err.to_string(), diesel::result::Error::NotFound.to_string());
    }
}
