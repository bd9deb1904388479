//! # REST API for Data Export
//!
//! Endpoints for exporting expense and income records as CSV. `/csv` hands
//! the generated content back for a browser-side download; `/to-path` writes
//! the file server-side through the export sink.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use chrono::Utc;
use log::{error, info};

use crate::backend::domain::export_service::{DirectorySink, ExportService};
use crate::backend::domain::Notifier;
use crate::backend::AppState;
use shared::{
    ExportCsvRequest, ExportCsvResponse, ExportToPathRequest, ExportToPathResponse, RecordKind,
};

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/csv", post(export_csv))
        .route("/to-path", post(export_to_path))
}

fn exported_notice(kind: RecordKind, count: usize) -> String {
    if count == 1 {
        format!("1 {} exported", kind)
    } else {
        format!("{} {} exported", count, kind.plural_label())
    }
}

/// Export records as CSV content for the browser to download
pub async fn export_csv(
    State(state): State<AppState>,
    Json(request): Json<ExportCsvRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/csv - request: {:?}", request);

    let rendered = match request.kind {
        RecordKind::Expense => {
            match state
                .expense_service
                .list_expenses_chronological(request.month.as_deref())
                .await
            {
                Ok(expenses) => state
                    .export_service
                    .render_expenses_csv(&expenses)
                    .map(|content| (content, expenses.len())),
                Err(e) => {
                    error!("Failed to load expenses for export: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export records")
                        .into_response();
                }
            }
        }
        RecordKind::Income => {
            match state
                .income_service
                .list_incomes_chronological(request.month.as_deref())
                .await
            {
                Ok(incomes) => state
                    .export_service
                    .render_incomes_csv(&incomes)
                    .map(|content| (content, incomes.len())),
                Err(e) => {
                    error!("Failed to load incomes for export: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export records")
                        .into_response();
                }
            }
        }
    };

    match rendered {
        Ok((Some(csv_content), count)) => {
            state
                .notifier
                .success("Export complete", &exported_notice(request.kind, count));
            let response = ExportCsvResponse {
                csv_content,
                filename: ExportService::filename_for(request.kind, Utc::now()),
                exported_count: count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok((None, _)) => {
            state.notifier.warning(
                "Nothing to export",
                &format!("No {} found for this period", request.kind.plural_label()),
            );
            let response = ExportCsvResponse {
                csv_content: String::new(),
                filename: String::new(),
                exported_count: 0,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to export records: {}", e);
            state.notifier.error("Export failed", &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export records").into_response()
        }
    }
}

/// Export records directly to a file on disk
pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/to-path - custom_path: {:?}", request.custom_path);

    let custom_sink = request
        .custom_path
        .as_deref()
        .filter(|path| !path.trim().is_empty())
        .map(|path| DirectorySink::new(state.export_service.sanitize_path(path)));

    let exported = match request.kind {
        RecordKind::Expense => {
            match state
                .expense_service
                .list_expenses_chronological(request.month.as_deref())
                .await
            {
                Ok(expenses) => match &custom_sink {
                    Some(sink) => state.export_service.export_expenses_to(sink, &expenses),
                    None => state.export_service.export_expenses(&expenses),
                },
                Err(e) => {
                    error!("Failed to load expenses for export: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export records")
                        .into_response();
                }
            }
        }
        RecordKind::Income => {
            match state
                .income_service
                .list_incomes_chronological(request.month.as_deref())
                .await
            {
                Ok(incomes) => match &custom_sink {
                    Some(sink) => state.export_service.export_incomes_to(sink, &incomes),
                    None => state.export_service.export_incomes(&incomes),
                },
                Err(e) => {
                    error!("Failed to load incomes for export: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export records")
                        .into_response();
                }
            }
        }
    };

    match exported {
        Ok(Some(receipt)) => {
            let file_path = receipt.file_path.to_string_lossy().to_string();
            state.notifier.success(
                "Export complete",
                &format!(
                    "{} to {}",
                    exported_notice(request.kind, receipt.exported_count),
                    file_path
                ),
            );
            let response = ExportToPathResponse {
                success: true,
                message: format!("File exported successfully to: {}", file_path),
                file_path,
                exported_count: receipt.exported_count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => {
            state.notifier.warning(
                "Nothing to export",
                &format!("No {} found for this period", request.kind.plural_label()),
            );
            let response = ExportToPathResponse {
                success: false,
                message: format!("No {} to export", request.kind.plural_label()),
                file_path: String::new(),
                exported_count: 0,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to export to path: {}", e);
            state.notifier.error("Export failed", &e.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to export: {}", e),
                    file_path: String::new(),
                    exported_count: 0,
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::expenses::CreateExpenseCommand;
    use crate::backend::test_utils::test_app_state;

    #[tokio::test]
    async fn test_export_csv_empty_store_surfaces_warning() {
        let (mut state, _dir) = test_app_state();
        let notifier = std::sync::Arc::new(
            crate::backend::domain::notify::test_support::RecordingNotifier::default(),
        );
        state.notifier = notifier.clone();

        let request = ExportCsvRequest {
            kind: RecordKind::Expense,
            month: None,
        };
        let response = export_csv(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, shared::NotificationKind::Warning);
        assert_eq!(notices[0].title, "Nothing to export");
    }

    #[tokio::test]
    async fn test_export_csv_success_reports_count() {
        let (mut state, _dir) = test_app_state();
        let notifier = std::sync::Arc::new(
            crate::backend::domain::notify::test_support::RecordingNotifier::default(),
        );
        state.notifier = notifier.clone();

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

        let request = ExportCsvRequest {
            kind: RecordKind::Expense,
            month: None,
        };
        let response = export_csv(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices[0].kind, shared::NotificationKind::Success);
        assert!(notices[0].description.contains("1 expense exported"));
    }

    #[tokio::test]
    async fn test_export_to_custom_path_writes_file() {
        let (state, _dir) = test_app_state();
        let export_dir = tempfile::TempDir::new().unwrap();

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

        let request = ExportToPathRequest {
            kind: RecordKind::Expense,
            month: None,
            custom_path: Some(export_dir.path().to_string_lossy().to_string()),
        };
        let response = export_to_path(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let written: Vec<_> = std::fs::read_dir(export_dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }

    #[tokio::test]
    async fn test_export_to_path_empty_store_writes_nothing() {
        let (state, _dir) = test_app_state();
        let export_dir = tempfile::TempDir::new().unwrap();

        let request = ExportToPathRequest {
            kind: RecordKind::Income,
            month: None,
            custom_path: Some(export_dir.path().to_string_lossy().to_string()),
        };
        let response = export_to_path(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
        assert_eq!(std::fs::read_dir(export_dir.path()).unwrap().count(), 0);
    }
}
