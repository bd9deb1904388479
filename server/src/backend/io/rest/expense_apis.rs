//! # REST API for Expenses
//!
//! Endpoints for listing, logging, and deleting expenses.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use crate::backend::domain::commands::{expenses::ExpenseListQuery, DeleteRecordsCommand};
use crate::backend::io::rest::{domain_error_response, mappers::expense_mapper::ExpenseMapper};
use crate::backend::AppState;
use shared::{
    CreateExpenseRequest, DeleteRecordsRequest, DeleteRecordsResponse, ExpenseListResponse,
    PaginationInfo,
};

// Query parameters for the expense listing API
#[derive(Debug, Deserialize)]
pub struct ExpenseListParams {
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub month: Option<String>,
}

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_expenses).post(create_expense).delete(delete_expenses),
    )
}

/// List expenses with optional month filtering and pagination
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ExpenseListParams>,
) -> impl IntoResponse {
    info!("GET /api/expenses - params: {:?}", params);

    let query = ExpenseListQuery {
        after: params.after,
        limit: params.limit,
        month: params.month,
    };

    match state.expense_service.list_expenses(query).await {
        Ok(result) => {
            let response = ExpenseListResponse {
                expenses: result
                    .expenses
                    .into_iter()
                    .map(ExpenseMapper::to_dto)
                    .collect(),
                pagination: PaginationInfo {
                    has_more: result.pagination.has_more,
                    next_cursor: result.pagination.next_cursor,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error listing expenses"),
    }
}

/// Log a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let command = ExpenseMapper::to_create_command(request);
    match state.expense_service.create_expense(command).await {
        Ok(expense) => {
            (StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error creating expense"),
    }
}

/// Delete multiple expenses
pub async fn delete_expenses(
    State(state): State<AppState>,
    Json(request): Json<DeleteRecordsRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses - request: {:?}", request);

    let command = DeleteRecordsCommand { ids: request.ids };
    match state.expense_service.delete_expenses(command).await {
        Ok(result) => {
            let response = DeleteRecordsResponse {
                deleted_count: result.deleted_count,
                success_message: result.success_message,
                not_found_ids: result.not_found_ids,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error deleting expenses"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_utils::test_app_state;

    #[tokio::test]
    async fn test_create_expense_handler() {
        let (state, _dir) = test_app_state();

        let request = CreateExpenseRequest {
            date: Some("2024-01-05".to_string()),
            category: "Food & Drinks".to_string(),
            description: "Lunch".to_string(),
            amount: 12.5,
        };

        let response = create_expense(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_expense_validation_error() {
        let (state, _dir) = test_app_state();

        // Empty description should be rejected with a 400
        let request = CreateExpenseRequest {
            date: None,
            category: "Food & Drinks".to_string(),
            description: "".to_string(),
            amount: 10.0,
        };

        let response = create_expense(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_expenses_handler() {
        let (state, _dir) = test_app_state();

        let created = state
            .expense_service
            .create_expense(crate::backend::domain::commands::expenses::CreateExpenseCommand {
                date: Some("2024-01-05".to_string()),
                category: "Food & Drinks".to_string(),
                description: "Lunch".to_string(),
                amount: 12.5,
            })
            .await
            .unwrap();

        let request = DeleteRecordsRequest {
            ids: vec![created.id],
        };
        let response = delete_expenses(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_expenses_empty_list() {
        let (state, _dir) = test_app_state();

        let request = DeleteRecordsRequest { ids: vec![] };
        let response = delete_expenses(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
