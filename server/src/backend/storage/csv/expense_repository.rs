use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::backend::{
    domain::models::expense::Expense, storage::traits::ExpenseStorage,
};

use super::connection::{CsvConnection, EXPENSES_HEADER};

/// CSV-based expense repository
#[derive(Clone)]
pub struct CsvExpenseRepository {
    connection: CsvConnection,
}

impl CsvExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_expenses(&self) -> Result<Vec<Expense>> {
        let file_path = self.connection.expenses_file_path();
        self.connection
            .ensure_file_exists(&file_path, &EXPENSES_HEADER)?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut expenses = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            match parse_record(&record) {
                Some(expense) => expenses.push(expense),
                None => warn!("Skipping malformed expense row: {:?}", record),
            }
        }
        Ok(expenses)
    }

    /// Rewrite the whole file through a temp file so readers never observe a
    /// half-written state.
    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let file_path = self.connection.expenses_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(EXPENSES_HEADER)?;
            for expense in expenses {
                csv_writer.write_record(&[
                    expense.id.clone(),
                    expense.date.to_string(),
                    expense.category.clone(),
                    expense.description.clone(),
                    expense.amount.to_string(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn parse_record(record: &StringRecord) -> Option<Expense> {
    Some(Expense {
        id: record.get(0)?.to_string(),
        date: NaiveDate::parse_from_str(record.get(1)?, "%Y-%m-%d").ok()?,
        category: record.get(2)?.to_string(),
        description: record.get(3)?.to_string(),
        amount: record.get(4)?.parse::<f64>().ok()?,
    })
}

#[async_trait]
impl ExpenseStorage for CsvExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        let mut expenses = self.read_expenses()?;
        expenses.push(expense.clone());
        self.write_expenses(&expenses)
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.read_expenses()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    async fn delete_expenses(&self, ids: &[String]) -> Result<u32> {
        let expenses = self.read_expenses()?;
        let before = expenses.len();
        let remaining: Vec<Expense> = expenses
            .into_iter()
            .filter(|e| !ids.contains(&e.id))
            .collect();
        let deleted = (before - remaining.len()) as u32;
        if deleted > 0 {
            self.write_expenses(&remaining)?;
        }
        Ok(deleted)
    }

    async fn check_expenses_exist(&self, ids: &[String]) -> Result<Vec<String>> {
        let expenses = self.read_expenses()?;
        Ok(ids
            .iter()
            .filter(|id| expenses.iter().any(|e| &e.id == *id))
            .cloned()
            .collect())
    }
}
