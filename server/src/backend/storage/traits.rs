//! # Storage Traits
//!
//! Storage abstraction for the dashboard's three record types. The domain
//! services depend only on these traits, so the backing store can change
//! without touching business logic.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{
    expense::Expense, income::Income, shopping_item::ShoppingItem,
};

/// Interface for expense storage operations
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// List all expenses, date descending (ties broken by ID descending)
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Delete expenses by ID, returning how many were actually removed
    async fn delete_expenses(&self, ids: &[String]) -> Result<u32>;

    /// Of the given IDs, return the ones that exist
    async fn check_expenses_exist(&self, ids: &[String]) -> Result<Vec<String>>;
}

/// Interface for income storage operations
#[async_trait]
pub trait IncomeStorage: Send + Sync {
    /// Store a new income
    async fn store_income(&self, income: &Income) -> Result<()>;

    /// List all incomes, date descending (ties broken by ID descending)
    async fn list_incomes(&self) -> Result<Vec<Income>>;

    /// Delete incomes by ID, returning how many were actually removed
    async fn delete_incomes(&self, ids: &[String]) -> Result<u32>;

    /// Of the given IDs, return the ones that exist
    async fn check_incomes_exist(&self, ids: &[String]) -> Result<Vec<String>>;
}

/// Interface for shopping list storage operations
#[async_trait]
pub trait ShoppingItemStorage: Send + Sync {
    /// Store a new item
    async fn store_item(&self, item: &ShoppingItem) -> Result<()>;

    /// List all items, unpurchased first, then newest first
    async fn list_items(&self) -> Result<Vec<ShoppingItem>>;

    /// Replace an existing item (matched by ID)
    async fn update_item(&self, item: &ShoppingItem) -> Result<()>;

    /// Delete items by ID, returning how many were actually removed
    async fn delete_items(&self, ids: &[String]) -> Result<u32>;

    /// Of the given IDs, return the ones that exist
    async fn check_items_exist(&self, ids: &[String]) -> Result<Vec<String>>;

    /// Remove every purchased item, returning how many were removed
    async fn remove_purchased(&self) -> Result<u32>;
}

/// A storage backend that can hand out repositories for each record type.
pub trait Connection: Send + Sync + 'static {
    type ExpenseRepository: ExpenseStorage + Clone + Send + Sync + 'static;
    type IncomeRepository: IncomeStorage + Clone + Send + Sync + 'static;
    type ShoppingRepository: ShoppingItemStorage + Clone + Send + Sync + 'static;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_income_repository(&self) -> Self::IncomeRepository;
    fn create_shopping_repository(&self) -> Self::ShoppingRepository;
}
