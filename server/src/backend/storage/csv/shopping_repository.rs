use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::backend::{
    domain::models::shopping_item::ShoppingItem, storage::traits::ShoppingItemStorage,
};

use super::connection::{CsvConnection, SHOPPING_HEADER};

/// CSV-based shopping list repository
#[derive(Clone)]
pub struct CsvShoppingRepository {
    connection: CsvConnection,
}

impl CsvShoppingRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_items(&self) -> Result<Vec<ShoppingItem>> {
        let file_path = self.connection.shopping_file_path();
        self.connection
            .ensure_file_exists(&file_path, &SHOPPING_HEADER)?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut items = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            match parse_record(&record) {
                Some(item) => items.push(item),
                None => warn!("Skipping malformed shopping item row: {:?}", record),
            }
        }
        Ok(items)
    }

    fn write_items(&self, items: &[ShoppingItem]) -> Result<()> {
        let file_path = self.connection.shopping_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(SHOPPING_HEADER)?;
            for item in items {
                csv_writer.write_record(&[
                    item.id.clone(),
                    item.name.clone(),
                    item.category.clone(),
                    item.quantity.to_string(),
                    item.estimated_cost
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    item.purchased.to_string(),
                    item.created_at.to_rfc3339(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn parse_record(record: &StringRecord) -> Option<ShoppingItem> {
    let estimated_cost = match record.get(4)? {
        "" => None,
        raw => Some(raw.parse::<f64>().ok()?),
    };
    Some(ShoppingItem {
        id: record.get(0)?.to_string(),
        name: record.get(1)?.to_string(),
        category: record.get(2)?.to_string(),
        quantity: record.get(3)?.parse::<u32>().ok()?,
        estimated_cost,
        purchased: record.get(5)?.parse::<bool>().ok()?,
        created_at: DateTime::parse_from_rfc3339(record.get(6)?)
            .ok()?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl ShoppingItemStorage for CsvShoppingRepository {
    async fn store_item(&self, item: &ShoppingItem) -> Result<()> {
        let mut items = self.read_items()?;
        items.push(item.clone());
        self.write_items(&items)
    }

    async fn list_items(&self) -> Result<Vec<ShoppingItem>> {
        let mut items = self.read_items()?;
        items.sort_by(|a, b| {
            a.purchased
                .cmp(&b.purchased)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(items)
    }

    async fn update_item(&self, item: &ShoppingItem) -> Result<()> {
        let mut items = self.read_items()?;
        let slot = items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| anyhow!("Shopping item not found: {}", item.id))?;
        *slot = item.clone();
        self.write_items(&items)
    }

    async fn delete_items(&self, ids: &[String]) -> Result<u32> {
        let items = self.read_items()?;
        let before = items.len();
        let remaining: Vec<ShoppingItem> = items
            .into_iter()
            .filter(|item| !ids.contains(&item.id))
            .collect();
        let deleted = (before - remaining.len()) as u32;
        if deleted > 0 {
            self.write_items(&remaining)?;
        }
        Ok(deleted)
    }

    async fn check_items_exist(&self, ids: &[String]) -> Result<Vec<String>> {
        let items = self.read_items()?;
        Ok(ids
            .iter()
            .filter(|id| items.iter().any(|item| &item.id == *id))
            .cloned()
            .collect())
    }

    async fn remove_purchased(&self) -> Result<u32> {
        let items = self.read_items()?;
        let before = items.len();
        let remaining: Vec<ShoppingItem> =
            items.into_iter().filter(|item| !item.purchased).collect();
        let removed = (before - remaining.len()) as u32;
        if removed > 0 {
            self.write_items(&remaining)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::temp_connection;
    use super::*;
    use chrono::TimeZone;

    fn sample_item(id: &str, name: &str, purchased: bool, created_secs: i64) -> ShoppingItem {
        ShoppingItem {
            id: id.to_string(),
            name: name.to_string(),
            category: "Groceries".to_string(),
            quantity: 2,
            estimated_cost: Some(4.5),
            purchased,
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_unpurchased_first() {
        let (connection, _dir) = temp_connection();
        let repo = CsvShoppingRepository::new(connection);

        repo.store_item(&sample_item("item::1", "Milk", true, 100))
            .await
            .unwrap();
        repo.store_item(&sample_item("item::2", "Eggs", false, 50))
            .await
            .unwrap();
        repo.store_item(&sample_item("item::3", "Bread", false, 200))
            .await
            .unwrap();

        let items = repo.list_items().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bread", "Eggs", "Milk"]);
    }

    #[tokio::test]
    async fn test_update_item_persists_flag() {
        let (connection, _dir) = temp_connection();
        let repo = CsvShoppingRepository::new(connection);

        let mut item = sample_item("item::1", "Milk", false, 100);
        repo.store_item(&item).await.unwrap();

        item.purchased = true;
        repo.update_item(&item).await.unwrap();

        let items = repo.list_items().await.unwrap();
        assert!(items[0].purchased);
    }

    #[tokio::test]
    async fn test_update_missing_item_fails() {
        let (connection, _dir) = temp_connection();
        let repo = CsvShoppingRepository::new(connection);
        let item = sample_item("item::404", "Ghost", false, 100);
        assert!(repo.update_item(&item).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_purchased() {
        let (connection, _dir) = temp_connection();
        let repo = CsvShoppingRepository::new(connection);

        repo.store_item(&sample_item("item::1", "Milk", true, 100))
            .await
            .unwrap();
        repo.store_item(&sample_item("item::2", "Eggs", false, 50))
            .await
            .unwrap();

        let removed = repo.remove_purchased().await.unwrap();
        assert_eq!(removed, 1);
        let items = repo.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Eggs");
    }

    #[tokio::test]
    async fn test_missing_estimated_cost_roundtrips_as_none() {
        let (connection, _dir) = temp_connection();
        let repo = CsvShoppingRepository::new(connection);

        let mut item = sample_item("item::1", "Milk", false, 100);
        item.estimated_cost = None;
        repo.store_item(&item).await.unwrap();

        let items = repo.list_items().await.unwrap();
        assert_eq!(items[0].estimated_cost, None);
    }
}
