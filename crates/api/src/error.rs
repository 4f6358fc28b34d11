use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use zaprelay_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for pipeline errors. Implements [`IntoResponse`] to
/// produce consistent JSON error responses of the form
/// `{ "error": CODE, "message": ..., "details": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A pipeline-level error from `zaprelay_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Core(core) = &self;
        let (status, code, message, details) = match core {
            CoreError::ConfigMissing { keys } => {
                tracing::error!(?keys, "Required configuration missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_MISSING",
                    core.to_string(),
                    Some(json!(keys)),
                )
            }
            CoreError::UpstreamUnavailable {
                message,
                status,
                body,
            } => {
                tracing::warn!(error = %message, upstream_status = ?status, "Upstream unavailable");
                let details = status.map(|s| json!({ "status": s, "body": body }));
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    core.to_string(),
                    details,
                )
            }
            CoreError::UpstreamQuery(errors) => {
                tracing::warn!(error = %core, "Upstream query rejected");
                (
                    StatusCode::BAD_REQUEST,
                    "UPSTREAM_QUERY_ERROR",
                    core.to_string(),
                    Some(json!(errors)),
                )
            }
            CoreError::UpstreamShape(msg) => {
                tracing::warn!(error = %msg, "Unexpected upstream response");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_SHAPE_ERROR",
                    core.to_string(),
                    None,
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": code,
            "message": message,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}
