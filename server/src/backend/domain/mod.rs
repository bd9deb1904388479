//! # Domain Module
//!
//! Business logic for the finance dashboard, independent of HTTP and of the
//! storage backend.
//!
//! ## Module Organization
//!
//! - **expense_service / income_service / shopping_service**: record CRUD on
//!   top of the storage traits
//! - **summary_service**: category and monthly aggregations for the charts
//! - **export_service**: CSV generation and file placement
//! - **validation**: field checks and the user-facing message catalog
//! - **notify**: the four-severity notice contract
//! - **categories**: the built-in category palette
//!
//! ## Business Rules
//!
//! - Descriptions, names, and categories are required and capped at 256 characters
//! - Amounts are positive, at least 0.01
//! - Record IDs embed their creation timestamp for stable ordering
//! - Aggregation and export are total over any record collection, including
//!   the empty one

pub mod categories;
pub mod commands;
pub mod expense_service;
pub mod export_service;
pub mod income_service;
pub mod models;
pub mod notify;
pub mod shopping_service;
pub mod summary_service;
pub mod validation;

pub use commands::*;
pub use expense_service::*;
pub use export_service::*;
pub use income_service::*;
pub use notify::*;
pub use shopping_service::*;
pub use summary_service::*;
pub use validation::{MessageCatalog, ValidationFailed, ValidationIssue};
