//! # Storage Module
//!
//! Persistence for the dashboard's records. The domain layer only ever sees
//! the traits in [`traits`]; the CSV file store in [`csv`] is the shipped
//! implementation behind them.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::*;
