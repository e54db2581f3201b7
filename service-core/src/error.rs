use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message reported for every request that fails field validation.
pub const VALIDATION_ERRORS_MESSAGE: &str = "validation errors";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid input: {}", .0.join(", "))]
    InvalidInput(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Unresolved reference: {}", .0.join(", "))]
    UnresolvedReference(Vec<String>),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UnresolvedReference(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        #[derive(Serialize)]
        struct ErrorListResponse {
            errors: Vec<String>,
        }

        let status = self.status();

        // Request-shape failures carry an `errors` array; everything else a single `error`.
        let (error_message, details) = match self {
            AppError::ValidationError(err) => {
                tracing::debug!(error = %err, "Request failed validation");
                return (
                    status,
                    Json(ErrorListResponse {
                        errors: vec![VALIDATION_ERRORS_MESSAGE.to_string()],
                    }),
                )
                    .into_response();
            }
            AppError::InvalidInput(errors) | AppError::UnresolvedReference(errors) => {
                return (status, Json(ErrorListResponse { errors })).into_response();
            }
            AppError::NotFound(err) => (err.to_string(), None),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    "Internal server error".to_string(),
                    Some(format!("{:#?}", err)),
                )
            }
            AppError::DatabaseError(err) => {
                tracing::error!(error = %err, "Database error");
                ("Database error".to_string(), Some(err.to_string()))
            }
            AppError::ConfigError(err) => (
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_uses_single_error_field() {
        let response = AppError::NotFound(anyhow::anyhow!("Restaurant not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Restaurant not found" }));
    }

    #[tokio::test]
    async fn unresolved_reference_uses_error_list() {
        let response =
            AppError::UnresolvedReference(vec!["Pizza or Restaurant not found".to_string()])
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "errors": ["Pizza or Restaurant not found"] })
        );
    }

    #[tokio::test]
    async fn validation_errors_collapse_to_generic_message() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("price", validator::ValidationError::new("range"));

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "errors": ["validation errors"] }));
    }

    #[tokio::test]
    async fn database_error_hides_cause_behind_details() {
        let response =
            AppError::DatabaseError(anyhow::anyhow!("disk I/O error")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Database error");
        assert_eq!(body["details"], "disk I/O error");
    }
}
