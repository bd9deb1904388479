//! Aggregations backing the dashboard charts.
//!
//! Pure functions over records the caller already fetched; nothing here
//! touches storage. Every operation is total, including over the empty
//! collection.

use shared::{CategoryTotal, MonthlyTotal};
use std::collections::BTreeMap;

use crate::backend::domain::{
    categories,
    models::{expense::Expense, income::Income},
};

#[derive(Clone)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Per-category spending totals, largest first. Built-in categories keep
    /// their chart color; user-defined ones get none.
    pub fn category_totals(&self, expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for expense in expenses {
            *sums.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        }

        let mut totals: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                color: categories::color_for(&category),
                category,
                total,
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        totals
    }

    pub fn grand_total(&self, totals: &[CategoryTotal]) -> f64 {
        totals.iter().map(|t| t.total).sum()
    }

    /// Expense and income totals per calendar month, oldest month first.
    pub fn monthly_totals(&self, expenses: &[Expense], incomes: &[Income]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for expense in expenses {
            let key = expense.date.format("%Y-%m").to_string();
            months.entry(key).or_insert((0.0, 0.0)).0 += expense.amount;
        }
        for income in incomes {
            let key = income.date.format("%Y-%m").to_string();
            months.entry(key).or_insert((0.0, 0.0)).1 += income.amount;
        }

        months
            .into_iter()
            .map(|(month, (expense_total, income_total))| MonthlyTotal {
                month,
                expense_total,
                income_total,
            })
            .collect()
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
