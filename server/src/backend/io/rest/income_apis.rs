//! # REST API for Incomes
//!
//! Endpoints for listing, logging, and deleting incomes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use crate::backend::domain::commands::{incomes::IncomeListQuery, DeleteRecordsCommand};
use crate::backend::io::rest::{domain_error_response, mappers::income_mapper::IncomeMapper};
use crate::backend::AppState;
use shared::{
    CreateIncomeRequest, DeleteRecordsRequest, DeleteRecordsResponse, IncomeListResponse,
    PaginationInfo,
};

#[derive(Debug, Deserialize)]
pub struct IncomeListParams {
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub month: Option<String>,
}

/// Create a router for income related APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_incomes).post(create_income).delete(delete_incomes),
    )
}

/// List incomes with optional month filtering and pagination
pub async fn list_incomes(
    State(state): State<AppState>,
    Query(params): Query<IncomeListParams>,
) -> impl IntoResponse {
    info!("GET /api/incomes - params: {:?}", params);

    let query = IncomeListQuery {
        after: params.after,
        limit: params.limit,
        month: params.month,
    };

    match state.income_service.list_incomes(query).await {
        Ok(result) => {
            let response = IncomeListResponse {
                incomes: result.incomes.into_iter().map(IncomeMapper::to_dto).collect(),
                pagination: PaginationInfo {
                    has_more: result.pagination.has_more,
                    next_cursor: result.pagination.next_cursor,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error listing incomes"),
    }
}

/// Log a new income
pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> impl IntoResponse {
    info!("POST /api/incomes - request: {:?}", request);

    let command = IncomeMapper::to_create_command(request);
    match state.income_service.create_income(command).await {
        Ok(income) => (StatusCode::CREATED, Json(IncomeMapper::to_dto(income))).into_response(),
        Err(e) => domain_error_response(&state, e, "Error creating income"),
    }
}

/// Delete multiple incomes
pub async fn delete_incomes(
    State(state): State<AppState>,
    Json(request): Json<DeleteRecordsRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/incomes - request: {:?}", request);

    let command = DeleteRecordsCommand { ids: request.ids };
    match state.income_service.delete_incomes(command).await {
        Ok(result) => {
            let response = DeleteRecordsResponse {
                deleted_count: result.deleted_count,
                success_message: result.success_message,
                not_found_ids: result.not_found_ids,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error deleting incomes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_utils::test_app_state;

    #[tokio::test]
    async fn test_create_income_handler() {
        let (state, _dir) = test_app_state();

        let request = CreateIncomeRequest {
            date: Some("2024-03-01".to_string()),
            source: "Salary".to_string(),
            description: "March pay".to_string(),
            amount: 2500.0,
        };

        let response = create_income(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_income_rejects_negative_amount() {
        let (state, _dir) = test_app_state();

        let request = CreateIncomeRequest {
            date: None,
            source: "Salary".to_string(),
            description: "Pay".to_string(),
            amount: -5.0,
        };

        let response = create_income(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
