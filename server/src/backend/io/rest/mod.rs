//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance dashboard. This layer handles:
//! - Request/response serialization between JSON and the shared DTOs
//! - Translating validation failures into field-level 400 responses
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Business logic stays in the domain layer; handlers only orchestrate.

pub mod category_apis;
pub mod expense_apis;
pub mod export_apis;
pub mod income_apis;
pub mod mappers;
pub mod shopping_apis;
pub mod summary_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use shared::{FieldMessage, ValidationErrorResponse};

use crate::backend::domain::ValidationFailed;
use crate::backend::AppState;

/// Turn a domain error into the right HTTP response: validation failures
/// become 400s with per-field messages formatted through the catalog,
/// anything else is logged and becomes a 500.
pub fn domain_error_response(state: &AppState, err: anyhow::Error, context: &str) -> Response {
    if let Some(failed) = err.downcast_ref::<ValidationFailed>() {
        let field_messages: Vec<FieldMessage> = failed
            .issues
            .iter()
            .map(|issue| FieldMessage {
                field: issue.field.clone(),
                message: state.messages.format(issue),
            })
            .collect();
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                message: "Please fix the highlighted fields".to_string(),
                field_messages,
            }),
        )
            .into_response();
    }

    error!("{}: {}", context, err);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
}
