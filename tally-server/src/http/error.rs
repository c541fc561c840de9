//! API error types with IntoResponse
//!
//! Errors are converted to enveloped JSON responses with appropriate status
//! codes. Backend messages are passed through unchanged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::response::Envelope;
use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::storage::StorageError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400), raised before any backend call
    Validation(ValidationError),

    /// Resource not found by primary key (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Object storage error (500, logged)
    Storage(StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Database(e) => e.to_string(),
            Self::Storage(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            Self::Database(_) => tracing::error!("Database error: {}", message),
            Self::Storage(_) => tracing::error!("Storage error: {}", message),
            _ => tracing::debug!(status = status.as_u16(), "Request rejected: {}", message),
        }

        (status, Json(Envelope::failure(message))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::NoChanges { resource } => {
                Self::Validation(ValidationError::NoChanges { resource })
            }
            _ => Self::Database(e),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Missing { field: "profile" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "data": null, "error": "profile is required"})
        );
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "todo",
            id: "abc".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "todo 'abc' not found");
    }

    #[tokio::test]
    async fn backend_message_passed_through() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            format!("database error: {}", sqlx::Error::PoolTimedOut)
        );
    }

    #[tokio::test]
    async fn storage_rejection_is_500() {
        let err = ApiError::from(StorageError::Rejected {
            status: 400,
            message: "The resource already exists".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "storage rejected upload (400): The resource already exists"
        );
    }

    #[test]
    fn db_errors_translate() {
        assert!(matches!(
            ApiError::from(DbError::NotFound {
                resource: "habit",
                id: "x".into()
            }),
            ApiError::NotFound { resource: "habit", .. }
        ));
        assert!(matches!(
            ApiError::from(DbError::NoChanges { resource: "skill" }),
            ApiError::Validation(ValidationError::NoChanges { resource: "skill" })
        ));
    }
}
