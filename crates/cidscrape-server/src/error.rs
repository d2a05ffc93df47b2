//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::features::tokens::{GetTokenError, ListTokensError};
use crate::store::StoreError;

/// Error returned by API handlers
///
/// Absence of a record is not an error, so every variant is a server fault.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Store(ref e) => {
                tracing::error!(error = %e, "Store error while serving request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

impl From<ListTokensError> for ApiError {
    fn from(err: ListTokensError) -> Self {
        match err {
            ListTokensError::Store(e) => ApiError::Store(e),
        }
    }
}

impl From<GetTokenError> for ApiError {
    fn from(err: GetTokenError) -> Self {
        match err {
            GetTokenError::Store(e) => ApiError::Store(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_error_is_500_with_text_body() {
        let err = ApiError::Store(StoreError::Unavailable("connection refused".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "connection refused");
    }
}
