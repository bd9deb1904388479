use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense ID in format: "expense::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub date: String,
    /// Spending category (built-in or user-defined)
    pub category: String,
    /// Description of the expense (max 256 characters)
    pub description: String,
    /// Amount spent (always positive)
    pub amount: f64,
}

/// Income ID in format: "income::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    /// Calendar date the income was received (YYYY-MM-DD)
    pub date: String,
    /// Where the money came from (salary, freelance, gift, ...)
    pub source: String,
    /// Description of the income (max 256 characters)
    pub description: String,
    /// Amount received (always positive)
    pub amount: f64,
}

/// Shopping list item ID in format: "item::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    /// What to buy (max 256 characters)
    pub name: String,
    /// Spending category the purchase will fall under
    pub category: String,
    /// How many to buy (at least 1)
    pub quantity: u32,
    /// Expected cost, if known
    pub estimated_cost: Option<f64>,
    /// Whether the item has been bought
    pub purchased: bool,
    /// RFC 3339 timestamp the item was added
    pub created_at: String,
}

/// Discriminator selecting the export column layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    /// Plural label used in export filenames and notices
    pub fn plural_label(&self) -> &'static str {
        match self {
            RecordKind::Expense => "expenses",
            RecordKind::Income => "incomes",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Expense => write!(f, "expense"),
            RecordKind::Income => write!(f, "income"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Optional date override (YYYY-MM-DD) - uses today if not provided
    pub date: Option<String>,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListRequest {
    /// Cursor for pagination - expense ID to start after
    pub after: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<u32>,
    /// Restrict to one calendar month (YYYY-MM)
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncomeRequest {
    /// Optional date override (YYYY-MM-DD) - uses today if not provided
    pub date: Option<String>,
    pub source: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeListRequest {
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeListResponse {
    pub incomes: Vec<Income>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShoppingItemRequest {
    pub name: String,
    pub category: String,
    /// Defaults to 1 when omitted
    pub quantity: Option<u32>,
    pub estimated_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleShoppingItemRequest {
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleShoppingItemResponse {
    pub item: ShoppingItem,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearPurchasedResponse {
    pub removed_count: usize,
    pub success_message: String,
}

/// Request for deleting multiple records of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecordsRequest {
    pub ids: Vec<String>,
}

/// Response after deleting records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecordsResponse {
    pub deleted_count: usize,
    pub success_message: String,
    pub not_found_ids: Vec<String>,
}

/// Derived aggregate: one category's summed spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Display color (hex) for built-in categories; None for user-defined ones
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryResponse {
    pub totals: Vec<CategoryTotal>,
    pub grand_total: f64,
}

/// One calendar month's expense and income totals for the dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Calendar month (YYYY-MM)
    pub month: String,
    pub expense_total: f64,
    pub income_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryResponse {
    pub months: Vec<MonthlyTotal>,
}

/// A selectable spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub color: Option<String>,
    /// False for categories the user introduced through their records
    pub builtin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

/// Request for exporting records as CSV content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCsvRequest {
    pub kind: RecordKind,
    /// Restrict the export to one calendar month (YYYY-MM)
    pub month: Option<String>,
}

/// Response carrying generated CSV content for a browser-side download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCsvResponse {
    pub csv_content: String,
    pub filename: String,
    pub exported_count: usize,
}

/// Request for exporting records directly to a file on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub kind: RecordKind,
    pub month: Option<String>,
    /// Target directory; falls back to the configured export directory
    pub custom_path: Option<String>,
}

/// Response after exporting to a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub exported_count: usize,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A user-facing notice, rendered by the frontend toast layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

/// One field-level validation failure, already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// 400 response body for rejected create/update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub field_messages: Vec<FieldMessage>,
}

fn parse_prefixed_id(id: &str, prefix: &str) -> Result<u64, RecordIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(RecordIdError::InvalidFormat);
    }
    parts[1]
        .parse::<u64>()
        .map_err(|_| RecordIdError::InvalidTimestamp)
}

impl Expense {
    /// Generate expense ID from a creation timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("expense::{}", epoch_millis)
    }

    /// Parse an expense ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_prefixed_id(id, "expense")
    }

    /// Extract epoch timestamp from the ID for stable ordering
    pub fn extract_timestamp(&self) -> Result<u64, RecordIdError> {
        Self::parse_id(&self.id)
    }
}

impl Income {
    /// Generate income ID from a creation timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("income::{}", epoch_millis)
    }

    /// Parse an income ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_prefixed_id(id, "income")
    }

    /// Extract epoch timestamp from the ID for stable ordering
    pub fn extract_timestamp(&self) -> Result<u64, RecordIdError> {
        Self::parse_id(&self.id)
    }
}

impl ShoppingItem {
    /// Generate shopping item ID from a creation timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("item::{}", epoch_millis)
    }

    /// Parse a shopping item ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_prefixed_id(id, "item")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIdError::InvalidFormat => write!(f, "Invalid record ID format"),
            RecordIdError::InvalidTimestamp => write!(f, "Invalid timestamp in record ID"),
        }
    }
}

impl std::error::Error for RecordIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_record_ids() {
        assert_eq!(Expense::generate_id(1702516122000), "expense::1702516122000");
        assert_eq!(Income::generate_id(1702516125000), "income::1702516125000");
        assert_eq!(
            ShoppingItem::generate_id(1702516130000),
            "item::1702516130000"
        );
    }

    #[test]
    fn test_parse_expense_id() {
        let timestamp = Expense::parse_id("expense::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Wrong prefix, missing parts, junk timestamp
        assert!(Expense::parse_id("income::1702516122000").is_err());
        assert!(Expense::parse_id("expense").is_err());
        assert!(Expense::parse_id("expense::one::two").is_err());
        assert_eq!(
            Expense::parse_id("expense::not_a_number"),
            Err(RecordIdError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_extract_timestamp() {
        let expense = Expense {
            id: "expense::1702516122000".to_string(),
            date: "2023-12-14".to_string(),
            category: "Food".to_string(),
            description: "Lunch".to_string(),
            amount: 12.5,
        };
        assert_eq!(expense.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_record_kind_labels() {
        assert_eq!(RecordKind::Expense.plural_label(), "expenses");
        assert_eq!(RecordKind::Income.plural_label(), "incomes");
        assert_eq!(RecordKind::Expense.to_string(), "expense");
        assert_eq!(RecordKind::Income.to_string(), "income");
    }

    #[test]
    fn test_record_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RecordKind::Expense).unwrap(),
            "\"expense\""
        );
        let kind: RecordKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(kind, RecordKind::Income);
    }
}
