use chrono::NaiveDate;

/// A single logged income.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub id: String,
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
    pub amount: f64,
}
