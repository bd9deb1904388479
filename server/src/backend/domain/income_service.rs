//! Income logging and listing.

use anyhow::Result;
use chrono::Local;
use log::info;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::{
    domain::{
        commands::{
            incomes::{CreateIncomeCommand, IncomeListQuery, IncomeListResult},
            DeleteRecordsCommand, DeleteRecordsResult, PaginationInfo,
        },
        models::income::Income as DomainIncome,
        validation::{self, ValidationFailed},
    },
    storage::{Connection, IncomeStorage},
};

#[derive(Clone)]
pub struct IncomeService<C: Connection> {
    income_repository: C::IncomeRepository,
}

impl<C: Connection> IncomeService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            income_repository: connection.create_income_repository(),
        }
    }

    pub async fn create_income(&self, command: CreateIncomeCommand) -> Result<DomainIncome> {
        let mut issues = Vec::new();
        validation::check_required_text(&mut issues, "source", &command.source);
        validation::check_required_text(&mut issues, "description", &command.description);
        validation::check_amount(&mut issues, "amount", command.amount);
        let date = validation::check_date(&mut issues, "date", command.date.as_deref());
        if !issues.is_empty() {
            return Err(ValidationFailed::new(issues).into());
        }

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let income = DomainIncome {
            id: shared::Income::generate_id(now_millis),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            source: command.source.trim().to_string(),
            description: command.description.trim().to_string(),
            amount: command.amount,
        };

        self.income_repository.store_income(&income).await?;
        info!(
            "💰 Logged income {} - {} {:.2}",
            income.id, income.source, income.amount
        );
        Ok(income)
    }

    pub async fn list_incomes(&self, query: IncomeListQuery) -> Result<IncomeListResult> {
        let mut incomes = self.income_repository.list_incomes().await?;

        if let Some(month) = &query.month {
            incomes.retain(|i| i.date.format("%Y-%m").to_string() == *month);
        }
        if let Some(after) = &query.after {
            if let Some(pos) = incomes.iter().position(|i| &i.id == after) {
                incomes.drain(..=pos);
            }
        }

        let limit = query.limit.unwrap_or(20) as usize;
        let has_more = incomes.len() > limit;
        incomes.truncate(limit);
        let next_cursor = if has_more {
            incomes.last().map(|i| i.id.clone())
        } else {
            None
        };

        Ok(IncomeListResult {
            incomes,
            pagination: PaginationInfo {
                has_more,
                next_cursor,
            },
        })
    }

    /// Every income (optionally one month), oldest first.
    pub async fn list_incomes_chronological(
        &self,
        month: Option<&str>,
    ) -> Result<Vec<DomainIncome>> {
        let mut incomes = self.income_repository.list_incomes().await?;
        if let Some(month) = month {
            incomes.retain(|i| i.date.format("%Y-%m").to_string() == month);
        }
        incomes.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(incomes)
    }

    pub async fn delete_incomes(&self, command: DeleteRecordsCommand) -> Result<DeleteRecordsResult> {
        let existing_ids = self
            .income_repository
            .check_incomes_exist(&command.ids)
            .await?;
        let not_found_ids: Vec<String> = command
            .ids
            .iter()
            .filter(|id| !existing_ids.contains(id))
            .cloned()
            .collect();

        let deleted_count = if !existing_ids.is_empty() {
            self.income_repository.delete_incomes(&existing_ids).await?
        } else {
            0
        };

        let success_message = match deleted_count {
            0 => "No incomes were deleted".to_string(),
            1 => "1 income deleted successfully".to_string(),
            n => format!("{} incomes deleted successfully", n),
        };

        Ok(DeleteRecordsResult {
            deleted_count: deleted_count as usize,
            not_found_ids,
            success_message,
        })
    }
}
