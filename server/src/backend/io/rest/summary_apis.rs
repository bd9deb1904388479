//! # REST API for Summaries
//!
//! Aggregated views backing the dashboard charts: per-category spending and
//! per-month expense/income totals.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use crate::backend::io::rest::domain_error_response;
use crate::backend::AppState;
use shared::{CategorySummaryResponse, MonthlySummaryResponse};

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// Restrict to one calendar month (YYYY-MM)
    pub month: Option<String>,
}

/// Create a router for summary related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category_summary))
        .route("/monthly", get(monthly_summary))
}

/// Per-category spending totals, optionally for a single month
pub async fn category_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse {
    info!("GET /api/summary/categories - params: {:?}", params);

    let expenses = match state
        .expense_service
        .list_expenses_chronological(params.month.as_deref())
        .await
    {
        Ok(expenses) => expenses,
        Err(e) => return domain_error_response(&state, e, "Error computing category summary"),
    };

    let totals = state.summary_service.category_totals(&expenses);
    let grand_total = state.summary_service.grand_total(&totals);
    (
        StatusCode::OK,
        Json(CategorySummaryResponse {
            totals,
            grand_total,
        }),
    )
        .into_response()
}

/// Expense and income totals per calendar month
pub async fn monthly_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/monthly");

    let expenses = match state.expense_service.list_expenses_chronological(None).await {
        Ok(expenses) => expenses,
        Err(e) => return domain_error_response(&state, e, "Error computing monthly summary"),
    };
    let incomes = match state.income_service.list_incomes_chronological(None).await {
        Ok(incomes) => incomes,
        Err(e) => return domain_error_response(&state, e, "Error computing monthly summary"),
    };

    let months = state.summary_service.monthly_totals(&expenses, &incomes);
    (StatusCode::OK, Json(MonthlySummaryResponse { months })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::expenses::CreateExpenseCommand;
    use crate::backend::test_utils::test_app_state;

    #[tokio::test]
    async fn test_category_summary_handler() {
        let (state, _dir) = test_app_state();

        state
            .expense_service
            .create_expense(CreateExpenseCommand {
                date: Some("2024-01-05".to_string()),
                category: "Groceries".to_string(),
                description: "Weekly shop".to_string(),
                amount: 54.2,
            })
            .await
            .unwrap();

        let response = category_summary(
            State(state),
            Query(SummaryParams { month: None }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_monthly_summary_on_empty_store() {
        let (state, _dir) = test_app_state();
        let response = monthly_summary(State(state)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
