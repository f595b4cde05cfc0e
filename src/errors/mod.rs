//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::store::StoreError;
use crate::services::telegram::NotifyError;

/// Consistent JSON envelope for successful API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    /// Wrap a successful result together with a human-readable message.
    pub fn with_message(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message, for operations without a payload.
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        })
    }
}

/// JSON body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Messaging error: {0}")]
    Notify(#[from] NotifyError),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error comes from an external collaborator.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Store(_) | Self::Notify(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        AppError::Validation(format!("Semua data harus diisi (periksa: {})", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid webhook secret".to_string(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("Terjadi kesalahan: {msg}"),
                )
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Record store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("Terjadi kesalahan: {e}"),
                )
            }
            AppError::Notify(e) => {
                tracing::error!(error = %e, "Messaging error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("Terjadi kesalahan: {e}"),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "hello");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn api_response_message_only() {
        let response = ApiResponse::message("Data berhasil dihapus");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Data berhasil dihapus");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn app_error_is_not_found() {
        let err = AppError::NotFound("hewan".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("uid is required".to_string());
        assert_eq!(err.to_string(), "Validation error: uid is required");
    }

    #[test]
    fn store_error_converts_to_upstream() {
        let err: AppError = StoreError::Decode("bad row".to_string()).into();
        assert!(err.is_upstream());
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Upstream("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn upstream_error_body_carries_detail() {
        let response = AppError::Upstream("connection refused".into()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert!(json["error"].as_str().unwrap().contains("connection refused"));
    }
}
