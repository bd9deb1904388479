use chrono::NaiveDate;

/// A single logged expense, as the domain layer sees it.
///
/// Dates are proper calendar dates here; the string form only exists at the
/// DTO boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
}
