//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for the service and all endpoints.
//! It implements `axum::response::IntoResponse` to produce structured JSON
//! error responses with appropriate HTTP status codes. Every failure,
//! including unexpected database errors, ends the request only.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pizzeria_storage::StorageError;

use crate::schema::validation::FieldError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (e.g., per-field validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Referenced row absent (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing required fields or unknown referenced slugs (400).
    #[error("validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// Unexpected storage failure (500).
    #[error("internal error: {0}")]
    InternalError(String),

    /// Duplicate slug, duplicate recipe or ingredient still in use (409).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl ApiError {
    /// A single-field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ApiError::ValidationFailed(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorDetail {
                    code: "VALIDATION_FAILED".to_string(),
                    message: format!("{} validation error(s)", errors.len()),
                    details: serde_json::to_value(errors).ok(),
                },
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ApiErrorDetail {
                    code: "CONFLICT".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::IngredientNotFound(_) | StorageError::PizzaNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            StorageError::DuplicateSlug { .. }
            | StorageError::RecipeExists(_)
            | StorageError::IngredientInUse(_)
            | StorageError::PriceOverflow => ApiError::Conflict(err.to_string()),
            StorageError::UnknownReference { entity, slug } => {
                let field = if *entity == "pizza" {
                    "pizza_slug"
                } else {
                    "ingredients"
                };
                ApiError::invalid(
                    field,
                    format!("Provided {} '{}' does not exist", entity, slug),
                )
            }
            StorageError::EmptyRecipe(_) => ApiError::invalid("ingredients", err.to_string()),
            StorageError::Sqlite(_) | StorageError::Migration(_) => {
                tracing::error!(error = %err, "storage failure");
                ApiError::InternalError("internal storage error".to_string())
            }
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationFailed(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::Slug;

    #[test]
    fn storage_errors_map_to_taxonomy() {
        let slug = Slug::from("dough");
        assert!(matches!(
            ApiError::from(StorageError::IngredientNotFound(slug.clone())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::RecipeExists(slug.clone())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::IngredientInUse(slug.clone())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::Migration("boom".into())),
            ApiError::InternalError(_)
        ));

        match ApiError::from(StorageError::UnknownReference {
            entity: "ingredient",
            slug,
        }) {
            ApiError::ValidationFailed(errors) => {
                assert_eq!(errors[0].field, "ingredients");
                assert!(errors[0].message.contains("'dough'"));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn storage_failure_detail_stays_in_the_log() {
        match ApiError::from(StorageError::Migration("no such table: recipe".into())) {
            ApiError::InternalError(message) => {
                assert_eq!(message, "internal storage error");
                assert!(!message.contains("recipe"));
            }
            other => panic!("expected InternalError, got {other:?}"),
        }
    }

    #[test]
    fn price_overflow_is_conflict() {
        let response = ApiError::from(StorageError::PriceOverflow).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_failure_is_bad_request() {
        let response = ApiError::invalid("slug", "This field is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = ApiError::InternalError("disk".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
