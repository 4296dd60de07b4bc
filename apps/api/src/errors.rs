use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Insufficient credits")]
    InsufficientCredits,

    /// The model call failed or produced unusable output. Fatal for the request.
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Billing error: {0}")]
    Billing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Unauthorized. Please log in.".to_string(),
            ),
            AppError::InsufficientCredits => (
                StatusCode::PAYMENT_REQUIRED,
                "INSUFFICIENT_CREDITS",
                "You have used all your credits.".to_string(),
            ),
            AppError::AnalysisFailed(msg) => {
                tracing::error!("Analysis failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ANALYSIS_FAILED",
                    "The portfolio analysis could not be completed".to_string(),
                )
            }
            AppError::Billing(msg) => {
                tracing::error!("Billing error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BILLING_ERROR",
                    "A billing error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InsufficientCredits.into_response().status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AnalysisFailed("bad json".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
