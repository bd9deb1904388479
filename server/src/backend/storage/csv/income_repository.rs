use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::backend::{domain::models::income::Income, storage::traits::IncomeStorage};

use super::connection::{CsvConnection, INCOMES_HEADER};

/// CSV-based income repository
#[derive(Clone)]
pub struct CsvIncomeRepository {
    connection: CsvConnection,
}

impl CsvIncomeRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_incomes(&self) -> Result<Vec<Income>> {
        let file_path = self.connection.incomes_file_path();
        self.connection
            .ensure_file_exists(&file_path, &INCOMES_HEADER)?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut incomes = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            match parse_record(&record) {
                Some(income) => incomes.push(income),
                None => warn!("Skipping malformed income row: {:?}", record),
            }
        }
        Ok(incomes)
    }

    fn write_incomes(&self, incomes: &[Income]) -> Result<()> {
        let file_path = self.connection.incomes_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(INCOMES_HEADER)?;
            for income in incomes {
                csv_writer.write_record(&[
                    income.id.clone(),
                    income.date.to_string(),
                    income.source.clone(),
                    income.description.clone(),
                    income.amount.to_string(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn parse_record(record: &StringRecord) -> Option<Income> {
    Some(Income {
        id: record.get(0)?.to_string(),
        date: NaiveDate::parse_from_str(record.get(1)?, "%Y-%m-%d").ok()?,
        source: record.get(2)?.to_string(),
        description: record.get(3)?.to_string(),
        amount: record.get(4)?.parse::<f64>().ok()?,
    })
}

#[async_trait]
impl IncomeStorage for CsvIncomeRepository {
    async fn store_income(&self, income: &Income) -> Result<()> {
        let mut incomes = self.read_incomes()?;
        incomes.push(income.clone());
        self.write_incomes(&incomes)
    }

    async fn list_incomes(&self) -> Result<Vec<Income>> {
        let mut incomes = self.read_incomes()?;
        incomes.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(incomes)
    }

    async fn delete_incomes(&self, ids: &[String]) -> Result<u32> {
        let incomes = self.read_incomes()?;
        let before = incomes.len();
        let remaining: Vec<Income> = incomes
            .into_iter()
            .filter(|i| !ids.contains(&i.id))
            .collect();
        let deleted = (before - remaining.len()) as u32;
        if deleted > 0 {
            self.write_incomes(&remaining)?;
        }
        Ok(deleted)
    }

    async fn check_incomes_exist(&self, ids: &[String]) -> Result<Vec<String>> {
        let incomes = self.read_incomes()?;
        Ok(ids
            .iter()
            .filter(|id| incomes.iter().any(|i| &i.id == *id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::temp_connection;
    use super::*;

    fn sample_income(id: &str, date: &str, amount: f64) -> Income {
        Income {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            source: "Salary".to_string(),
            description: "Monthly pay".to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_store_list_delete() {
        let (connection, _dir) = temp_connection();
        let repo = CsvIncomeRepository::new(connection);

        repo.store_income(&sample_income("income::1", "2024-02-01", 2500.0))
            .await
            .unwrap();
        repo.store_income(&sample_income("income::2", "2024-03-01", 2600.0))
            .await
            .unwrap();

        let incomes = repo.list_incomes().await.unwrap();
        assert_eq!(incomes.len(), 2);
        assert_eq!(incomes[0].id, "income::2");

        let deleted = repo
            .delete_incomes(&["income::2".to_string(), "income::9".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(repo.list_incomes().await.unwrap().len(), 1);
    }
}
