use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::storage::traits::Connection;

use super::{CsvExpenseRepository, CsvIncomeRepository, CsvShoppingRepository};

pub const EXPENSES_HEADER: [&str; 5] = ["id", "date", "category", "description", "amount"];
pub const INCOMES_HEADER: [&str; 5] = ["id", "date", "source", "description", "amount"];
pub const SHOPPING_HEADER: [&str; 7] = [
    "id",
    "name",
    "category",
    "quantity",
    "estimated_cost",
    "purchased",
    "created_at",
];

/// CsvConnection manages the data directory and ensures each record file
/// exists with its header before a repository touches it.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory
    /// (platform data dir, falling back to ~/.spendboard)
    pub fn new_default() -> Result<Self> {
        let data_dir = match dirs::data_dir() {
            Some(dir) => dir.join("spendboard"),
            None => {
                let home = dirs::home_dir()
                    .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
                home.join(".spendboard")
            }
        };
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join("expenses.csv")
    }

    pub fn incomes_file_path(&self) -> PathBuf {
        self.base_directory.join("incomes.csv")
    }

    pub fn shopping_file_path(&self) -> PathBuf {
        self.base_directory.join("shopping_items.csv")
    }

    /// Ensure a CSV file exists with its header row
    pub fn ensure_file_exists(&self, path: &Path, header: &[&str]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;
        info!("Created {}", path.display());
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = CsvExpenseRepository;
    type IncomeRepository = CsvIncomeRepository;
    type ShoppingRepository = CsvShoppingRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        CsvExpenseRepository::new(self.clone())
    }

    fn create_income_repository(&self) -> Self::IncomeRepository {
        CsvIncomeRepository::new(self.clone())
    }

    fn create_shopping_repository(&self) -> Self::ShoppingRepository {
        CsvShoppingRepository::new(self.clone())
    }
}
