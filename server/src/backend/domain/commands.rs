//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod expenses {
    use crate::backend::domain::models::expense::Expense as DomainExpense;

    /// Input for logging a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        /// Optional date override (YYYY-MM-DD); today when absent.
        pub date: Option<String>,
        pub category: String,
        pub description: String,
        pub amount: f64,
    }

    /// Query parameters for listing expenses.
    #[derive(Debug, Clone, Default)]
    pub struct ExpenseListQuery {
        pub after: Option<String>,
        pub limit: Option<u32>,
        pub month: Option<String>,
    }

    /// Result of listing expenses.
    #[derive(Debug, Clone)]
    pub struct ExpenseListResult {
        pub expenses: Vec<DomainExpense>,
        pub pagination: super::PaginationInfo,
    }
}

pub mod incomes {
    use crate::backend::domain::models::income::Income as DomainIncome;

    /// Input for logging a new income.
    #[derive(Debug, Clone)]
    pub struct CreateIncomeCommand {
        pub date: Option<String>,
        pub source: String,
        pub description: String,
        pub amount: f64,
    }

    /// Query parameters for listing incomes.
    #[derive(Debug, Clone, Default)]
    pub struct IncomeListQuery {
        pub after: Option<String>,
        pub limit: Option<u32>,
        pub month: Option<String>,
    }

    /// Result of listing incomes.
    #[derive(Debug, Clone)]
    pub struct IncomeListResult {
        pub incomes: Vec<DomainIncome>,
        pub pagination: super::PaginationInfo,
    }
}

pub mod shopping {
    /// Input for adding a shopping list item.
    #[derive(Debug, Clone)]
    pub struct CreateShoppingItemCommand {
        pub name: String,
        pub category: String,
        pub quantity: Option<u32>,
        pub estimated_cost: Option<f64>,
    }

    /// Input for flipping an item's purchased flag.
    #[derive(Debug, Clone)]
    pub struct ToggleShoppingItemCommand {
        pub item_id: String,
    }
}

/// Command for deleting multiple records of one kind.
#[derive(Debug, Clone)]
pub struct DeleteRecordsCommand {
    pub ids: Vec<String>,
}

/// Result of deleting records.
#[derive(Debug, Clone)]
pub struct DeleteRecordsResult {
    pub deleted_count: usize,
    pub not_found_ids: Vec<String>,
    pub success_message: String,
}

/// Generic pagination info returned by list queries.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
