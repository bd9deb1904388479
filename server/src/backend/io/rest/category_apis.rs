//! # REST API for Categories
//!
//! Endpoint serving the selectable category set: built-ins with their chart
//! colors plus whatever the user introduced through their records.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use crate::backend::io::rest::domain_error_response;
use crate::backend::AppState;
use shared::CategoryListResponse;

/// Create a router for category related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// List selectable spending categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");

    match state.expense_service.list_categories().await {
        Ok(categories) => {
            (StatusCode::OK, Json(CategoryListResponse { categories })).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error listing categories"),
    }
}
