//! API error types with IntoResponse.
//!
//! Errors are converted to the standard `{ success: false, message }`
//! envelope. Upstream failures (database, image store) surface their
//! underlying message in the 500 body, which the frontend renders
//! directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::store::StoreError;
use crate::upload::UploadError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request conflicts with existing state (400)
    Conflict { reason: String },

    /// Missing or invalid session (401)
    Unauthorized,

    /// Authenticated but not allowed (403)
    Forbidden { reason: &'static str },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// External image store error (500, logged)
    Store(StoreError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Conflict { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            Self::Forbidden { reason } => (StatusCode::FORBIDDEN, reason.to_string()),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} '{}' not found", resource, id),
            ),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            Self::Store(e) => {
                tracing::error!("Image store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
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
            DbError::Conflict { reason } => Self::Conflict { reason },
            _ => Self::Database(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Db(e) => e.into(),
            UploadError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "image" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "image",
            id: "test".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unauthorized_is_401_and_forbidden_is_403() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        let err = ApiError::Forbidden {
            reason: "admin only",
        };
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn db_conflict_maps_to_400() {
        let err: ApiError = DbError::Conflict {
            reason: "property already rated by this user".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn error_body_uses_envelope() {
        use axum::body::to_bytes;

        let err = ApiError::NotFound {
            resource: "image",
            id: "abc".into(),
        };
        let response = err.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "image 'abc' not found");
    }
}
