//! Expense logging and listing.

use anyhow::Result;
use chrono::Local;
use log::info;
use shared::CategoryInfo;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::{
    domain::{
        categories,
        commands::{
            expenses::{CreateExpenseCommand, ExpenseListQuery, ExpenseListResult},
            DeleteRecordsCommand, DeleteRecordsResult, PaginationInfo,
        },
        models::expense::Expense as DomainExpense,
        validation::{self, ValidationFailed},
    },
    storage::{Connection, ExpenseStorage},
};

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
        }
    }

    pub async fn create_expense(&self, command: CreateExpenseCommand) -> Result<DomainExpense> {
        let mut issues = Vec::new();
        validation::check_required_text(&mut issues, "category", &command.category);
        validation::check_required_text(&mut issues, "description", &command.description);
        validation::check_amount(&mut issues, "amount", command.amount);
        let date = validation::check_date(&mut issues, "date", command.date.as_deref());
        if !issues.is_empty() {
            return Err(ValidationFailed::new(issues).into());
        }

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let expense = DomainExpense {
            id: shared::Expense::generate_id(now_millis),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            category: command.category.trim().to_string(),
            description: command.description.trim().to_string(),
            amount: command.amount,
        };

        self.expense_repository.store_expense(&expense).await?;
        info!(
            "💸 Logged expense {} - {} {:.2}",
            expense.id, expense.category, expense.amount
        );
        Ok(expense)
    }

    pub async fn list_expenses(&self, query: ExpenseListQuery) -> Result<ExpenseListResult> {
        let mut expenses = self.expense_repository.list_expenses().await?;

        if let Some(month) = &query.month {
            expenses.retain(|e| e.date.format("%Y-%m").to_string() == *month);
        }
        if let Some(after) = &query.after {
            if let Some(pos) = expenses.iter().position(|e| &e.id == after) {
                expenses.drain(..=pos);
            }
        }

        let limit = query.limit.unwrap_or(20) as usize;
        let has_more = expenses.len() > limit;
        expenses.truncate(limit);
        let next_cursor = if has_more {
            expenses.last().map(|e| e.id.clone())
        } else {
            None
        };

        Ok(ExpenseListResult {
            expenses,
            pagination: PaginationInfo {
                has_more,
                next_cursor,
            },
        })
    }

    /// Every expense (optionally one month), oldest first. Used by the
    /// export and summary endpoints, which never paginate.
    pub async fn list_expenses_chronological(
        &self,
        month: Option<&str>,
    ) -> Result<Vec<DomainExpense>> {
        let mut expenses = self.expense_repository.list_expenses().await?;
        if let Some(month) = month {
            expenses.retain(|e| e.date.format("%Y-%m").to_string() == month);
        }
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(expenses)
    }

    pub async fn delete_expenses(&self, command: DeleteRecordsCommand) -> Result<DeleteRecordsResult> {
        let existing_ids = self
            .expense_repository
            .check_expenses_exist(&command.ids)
            .await?;
        let not_found_ids: Vec<String> = command
            .ids
            .iter()
            .filter(|id| !existing_ids.contains(id))
            .cloned()
            .collect();

        let deleted_count = if !existing_ids.is_empty() {
            self.expense_repository
                .delete_expenses(&existing_ids)
                .await?
        } else {
            0
        };

        let success_message = match deleted_count {
            0 => "No expenses were deleted".to_string(),
            1 => "1 expense deleted successfully".to_string(),
            n => format!("{} expenses deleted successfully", n),
        };

        Ok(DeleteRecordsResult {
            deleted_count: deleted_count as usize,
            not_found_ids,
            success_message,
        })
    }

    /// Built-in categories (with colors) followed by any category the user
    /// introduced through their records.
    pub async fn list_categories(&self) -> Result<Vec<CategoryInfo>> {
        let expenses = self.expense_repository.list_expenses().await?;

        let mut result: Vec<CategoryInfo> = categories::BUILTIN_CATEGORIES
            .iter()
            .map(|(name, color)| CategoryInfo {
                name: (*name).to_string(),
                color: Some((*color).to_string()),
                builtin: true,
            })
            .collect();

        let user_defined: BTreeSet<String> = expenses
            .into_iter()
            .map(|e| e.category)
            .filter(|c| categories::color_for(c).is_none())
            .collect();
        result.extend(user_defined.into_iter().map(|name| CategoryInfo {
            name,
            color: None,
            builtin: false,
        }));

        Ok(result)
    }
}
