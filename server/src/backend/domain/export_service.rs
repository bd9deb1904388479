//! Export service: turns expense or income records into CSV files.
//!
//! The pipeline renders one header row plus one row per record, amounts as
//! plain decimals so spreadsheets parse them, and leans on the `csv` writer
//! for quoting: any field containing a comma, quote, or newline is wrapped in
//! quotes with inner quotes doubled. An empty record set never touches the
//! filesystem; deciding what to tell the user about that is the caller's job.
//!
//! The actual file write goes through the [`FileSink`] trait so the pipeline
//! is testable without a real export directory.

use chrono::{DateTime, Utc};
use csv::Writer;
use log::info;
use shared::RecordKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::backend::domain::models::{expense::Expense, income::Income};

pub const EXPENSE_COLUMNS: [&str; 4] = ["date", "category", "description", "amount"];
pub const INCOME_COLUMNS: [&str; 4] = ["date", "source", "description", "amount"];

/// Why an export failed. Local to one invocation; never retried.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] csv::Error),
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where exported bytes end up.
pub trait FileSink: Send + Sync {
    /// Write a named file, returning its final path.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, std::io::Error>;
}

/// Sink that drops files into one directory, creating it on first use.
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }
}

impl FileSink for DirectorySink {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// What a successful export produced.
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub file_path: PathBuf,
    pub filename: String,
    pub exported_count: usize,
}

/// Export service that handles CSV generation and file placement
#[derive(Clone)]
pub struct ExportService {
    sink: Arc<dyn FileSink>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn FileSink>) -> Self {
        Self { sink }
    }

    /// Render expenses as CSV text for a browser-side download.
    /// Returns `Ok(None)` for an empty record set.
    pub fn render_expenses_csv(&self, expenses: &[Expense]) -> Result<Option<String>, ExportError> {
        if expenses.is_empty() {
            return Ok(None);
        }
        let bytes = render_csv(&EXPENSE_COLUMNS, expenses.iter().map(expense_row))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Render incomes as CSV text for a browser-side download.
    pub fn render_incomes_csv(&self, incomes: &[Income]) -> Result<Option<String>, ExportError> {
        if incomes.is_empty() {
            return Ok(None);
        }
        let bytes = render_csv(&INCOME_COLUMNS, incomes.iter().map(income_row))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Write expenses through the default sink. `Ok(None)` on empty input,
    /// with no file-write side effect.
    pub fn export_expenses(&self, expenses: &[Expense]) -> Result<Option<ExportReceipt>, ExportError> {
        self.export_expenses_to(self.sink.as_ref(), expenses)
    }

    pub fn export_expenses_to(
        &self,
        sink: &dyn FileSink,
        expenses: &[Expense],
    ) -> Result<Option<ExportReceipt>, ExportError> {
        if expenses.is_empty() {
            return Ok(None);
        }
        let bytes = render_csv(&EXPENSE_COLUMNS, expenses.iter().map(expense_row))?;
        self.write_to_sink(sink, RecordKind::Expense, &bytes, expenses.len())
            .map(Some)
    }

    /// Write incomes through the default sink.
    pub fn export_incomes(&self, incomes: &[Income]) -> Result<Option<ExportReceipt>, ExportError> {
        self.export_incomes_to(self.sink.as_ref(), incomes)
    }

    pub fn export_incomes_to(
        &self,
        sink: &dyn FileSink,
        incomes: &[Income],
    ) -> Result<Option<ExportReceipt>, ExportError> {
        if incomes.is_empty() {
            return Ok(None);
        }
        let bytes = render_csv(&INCOME_COLUMNS, incomes.iter().map(income_row))?;
        self.write_to_sink(sink, RecordKind::Income, &bytes, incomes.len())
            .map(Some)
    }

    fn write_to_sink(
        &self,
        sink: &dyn FileSink,
        kind: RecordKind,
        bytes: &[u8],
        count: usize,
    ) -> Result<ExportReceipt, ExportError> {
        let filename = Self::filename_for(kind, Utc::now());
        let file_path = sink.write(&filename, bytes)?;
        info!(
            "📄 Exported {} {} to {}",
            count,
            kind.plural_label(),
            file_path.display()
        );
        Ok(ExportReceipt {
            file_path,
            filename,
            exported_count: count,
        })
    }

    /// Export filename: kind plus a second-resolution timestamp, so repeated
    /// same-day exports never overwrite each other.
    pub fn filename_for(kind: RecordKind, at: DateTime<Utc>) -> String {
        format!("{}_{}.csv", kind.plural_label(), at.format("%Y%m%d_%H%M%S"))
    }

    /// Basic path sanitization to handle common user input issues
    pub fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        // Remove surrounding quotes (single or double)
        if (cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\''))
        {
            cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
        }

        // Handle escaped spaces
        cleaned = cleaned.replace("\\ ", " ");

        // Remove trailing slashes/backslashes
        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        // Tilde expansion for home directory
        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if cleaned.starts_with("~/") {
                    cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }
}

fn render_csv(
    columns: &[&str],
    rows: impl Iterator<Item = [String; 4]>,
) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = Writer::from_writer(&mut buf);
        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush().map_err(ExportError::Io)?;
    }
    Ok(buf)
}

fn expense_row(expense: &Expense) -> [String; 4] {
    [
        expense.date.to_string(),
        expense.category.clone(),
        expense.description.clone(),
        format!("{:.2}", expense.amount),
    ]
}

fn income_row(income: &Income) -> [String; 4] {
    [
        income.date.to_string(),
        income.source.clone(),
        income.description.clone(),
        format!("{:.2}", income.amount),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::TempDir;

    fn temp_service() -> (ExportService, TempDir) {
        let dir = TempDir::new().unwrap();
        let service = ExportService::new(Arc::new(DirectorySink::new(dir.path())));
        (service, dir)
    }

    fn expense(date: &str, category: &str, description: &str, amount: f64) -> Expense {
        Expense {
            id: "expense::1".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.to_string(),
            description: description.to_string(),
            amount,
        }
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let (service, dir) = temp_service();
        let receipt = service.export_expenses(&[]).unwrap();
        assert!(receipt.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_has_header_plus_one_line_per_record() {
        let (service, _dir) = temp_service();
        let expenses: Vec<Expense> = (1..=4)
            .map(|day| expense(&format!("2024-01-{:02}", day), "Food & Drinks", "Lunch", 10.0))
            .collect();

        let csv_content = service.render_expenses_csv(&expenses).unwrap().unwrap();
        assert_eq!(csv_content.trim_end().lines().count(), 5);
        assert!(csv_content.starts_with("date,category,description,amount\n"));
    }

    #[test]
    fn test_fields_with_delimiters_and_quotes_are_escaped() {
        let (service, _dir) = temp_service();
        let expenses = vec![expense(
            "2024-01-05",
            "Food, Drinks",
            "Lunch \"deal\"",
            12.5,
        )];

        let csv_content = service.render_expenses_csv(&expenses).unwrap().unwrap();
        let row = csv_content.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-05,\"Food, Drinks\",\"Lunch \"\"deal\"\"\",12.50");
    }

    #[test]
    fn test_round_trip_preserves_tricky_fields() {
        let (service, _dir) = temp_service();
        let expenses = vec![expense(
            "2024-01-05",
            "Food, Drinks",
            "Lunch \"deal\"\nsecond line",
            12.5,
        )];

        let csv_content = service.render_expenses_csv(&expenses).unwrap().unwrap();
        let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(0), Some("2024-01-05"));
        assert_eq!(record.get(1), Some("Food, Drinks"));
        assert_eq!(record.get(2), Some("Lunch \"deal\"\nsecond line"));
        assert_eq!(record.get(3), Some("12.50"));
    }

    #[test]
    fn test_income_layout_uses_source_column() {
        let (service, _dir) = temp_service();
        let incomes = vec![Income {
            id: "income::1".to_string(),
            date: NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").unwrap(),
            source: "Salary".to_string(),
            description: "March pay".to_string(),
            amount: 2500.0,
        }];

        let csv_content = service.render_incomes_csv(&incomes).unwrap().unwrap();
        assert!(csv_content.starts_with("date,source,description,amount\n"));
        assert!(csv_content.contains("2024-03-01,Salary,March pay,2500.00"));
    }

    #[test]
    fn test_export_writes_file_through_sink() {
        let (service, dir) = temp_service();
        let expenses = vec![expense("2024-01-05", "Groceries", "Weekly shop", 54.2)];

        let receipt = service.export_expenses(&expenses).unwrap().unwrap();
        assert_eq!(receipt.exported_count, 1);
        assert!(receipt.filename.starts_with("expenses_"));
        assert!(receipt.file_path.starts_with(dir.path()));

        let written = std::fs::read_to_string(&receipt.file_path).unwrap();
        assert!(written.contains("Weekly shop"));
    }

    #[test]
    fn test_filenames_differ_across_same_day_exports() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 5, 21, 0, 5).unwrap();
        let first = ExportService::filename_for(RecordKind::Expense, morning);
        let second = ExportService::filename_for(RecordKind::Expense, evening);
        assert_eq!(first, "expenses_20240105_093000.csv");
        assert_ne!(first, second);
    }

    #[test]
    fn test_sanitize_path() {
        let (service, _dir) = temp_service();
        assert_eq!(service.sanitize_path("  /path/to/dir  "), "/path/to/dir");
        assert_eq!(service.sanitize_path("\"/path/to/dir\""), "/path/to/dir");
        assert_eq!(service.sanitize_path("/path\\ to\\ dir"), "/path to dir");
        assert_eq!(service.sanitize_path("/path/to/dir/"), "/path/to/dir");
    }
}
