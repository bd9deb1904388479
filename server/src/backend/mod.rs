//! # Backend Module
//!
//! Contains all non-UI logic for the finance dashboard.
//!
//! The backend follows a layered architecture:
//! ```text
//! Dashboard frontend (external)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, validation, export)
//!     ↓
//! Storage Layer (CSV file store behind traits)
//! ```
//!
//! This module wires the layers together: it builds the application state
//! from the configuration and assembles the axum router with CORS for the
//! dashboard origin.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::export_service::DirectorySink;
use crate::backend::domain::{
    ExpenseService, ExportService, IncomeService, LogNotifier, MessageCatalog, Notifier,
    ShoppingService, SummaryService,
};
use crate::backend::storage::CsvConnection;
use crate::config::ServerConfig;

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<CsvConnection>,
    pub income_service: IncomeService<CsvConnection>,
    pub shopping_service: ShoppingService<CsvConnection>,
    pub summary_service: SummaryService,
    pub export_service: ExportService,
    pub notifier: Arc<dyn Notifier>,
    pub messages: Arc<MessageCatalog>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up storage");
    let connection = Arc::new(match &config.data_dir {
        Some(dir) => CsvConnection::new(dir)?,
        None => CsvConnection::new_default()?,
    });

    info!("Setting up domain services");
    let expense_service = ExpenseService::new(connection.clone());
    let income_service = IncomeService::new(connection.clone());
    let shopping_service = ShoppingService::new(connection);
    let summary_service = SummaryService::new();
    let export_service =
        ExportService::new(Arc::new(DirectorySink::new(config.export_directory())));

    info!("Setting up application state");
    Ok(AppState {
        expense_service,
        income_service,
        shopping_service,
        summary_service,
        export_service,
        notifier: Arc::new(LogNotifier),
        messages: Arc::new(MessageCatalog::default()),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    // CORS setup to allow the dashboard frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/expenses", io::rest::expense_apis::router())
        .nest("/incomes", io::rest::income_apis::router())
        .nest("/shopping", io::rest::shopping_apis::router())
        .nest("/categories", io::rest::category_apis::router())
        .nest("/summary", io::rest::summary_apis::router())
        .nest("/export", io::rest::export_apis::router())
        .route("/healthz", get(healthz));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

async fn healthz() -> &'static str {
    "ok"
}
