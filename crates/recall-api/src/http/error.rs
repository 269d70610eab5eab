//! Application error type mapping to HTTP status codes.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use recall_types::error::MemoryLogError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A memory log service failure, with the operation that failed.
    Memory {
        context: &'static str,
        source: MemoryLogError,
    },
    /// Malformed request body or query string.
    Validation(String),
}

impl AppError {
    /// Wrap a service error with the message prefix for the failing operation.
    pub fn memory(context: &'static str, source: MemoryLogError) -> Self {
        AppError::Memory { context, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Memory {
                source: MemoryLogError::Validation(msg),
                ..
            } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Memory { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                format!("{context}: {source}"),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = json!({
            "detail": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_storage_error_is_500_with_underlying_text() {
        let err = AppError::memory(
            "Failed to create memory log",
            MemoryLogError::Storage("query error: disk I/O error".to_string()),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "STORAGE_ERROR");
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Failed to create memory log: "));
        assert!(detail.contains("disk I/O error"));
    }

    #[tokio::test]
    async fn test_service_validation_error_is_400() {
        let err = AppError::memory(
            "Failed to recall memories",
            MemoryLogError::Validation("limit must not be negative, got -1".to_string()),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_request_validation_error_is_400() {
        let response = AppError::Validation("missing field `reason`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "missing field `reason`");
    }
}
