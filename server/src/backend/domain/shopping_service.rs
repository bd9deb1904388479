//! Shopping list management.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::{
    domain::{
        commands::{
            shopping::{CreateShoppingItemCommand, ToggleShoppingItemCommand},
            DeleteRecordsCommand, DeleteRecordsResult,
        },
        models::shopping_item::ShoppingItem as DomainShoppingItem,
        validation::{self, ValidationFailed},
    },
    storage::{Connection, ShoppingItemStorage},
};

#[derive(Clone)]
pub struct ShoppingService<C: Connection> {
    shopping_repository: C::ShoppingRepository,
}

impl<C: Connection> ShoppingService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            shopping_repository: connection.create_shopping_repository(),
        }
    }

    pub async fn add_item(
        &self,
        command: CreateShoppingItemCommand,
    ) -> Result<DomainShoppingItem> {
        let mut issues = Vec::new();
        validation::check_required_text(&mut issues, "name", &command.name);
        validation::check_required_text(&mut issues, "category", &command.category);
        let quantity = command.quantity.unwrap_or(1);
        validation::check_quantity(&mut issues, "quantity", quantity);
        if let Some(cost) = command.estimated_cost {
            validation::check_amount(&mut issues, "estimated_cost", cost);
        }
        if !issues.is_empty() {
            return Err(ValidationFailed::new(issues).into());
        }

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let item = DomainShoppingItem {
            id: shared::ShoppingItem::generate_id(now_millis),
            name: command.name.trim().to_string(),
            category: command.category.trim().to_string(),
            quantity,
            estimated_cost: command.estimated_cost,
            purchased: false,
            created_at: Utc::now(),
        };

        self.shopping_repository.store_item(&item).await?;
        info!("🛒 Added shopping item {} - {}", item.id, item.name);
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<DomainShoppingItem>> {
        self.shopping_repository.list_items().await
    }

    /// Flip an item's purchased flag, returning the updated item.
    pub async fn toggle_purchased(
        &self,
        command: ToggleShoppingItemCommand,
    ) -> Result<DomainShoppingItem> {
        let items = self.shopping_repository.list_items().await?;
        let mut item = items
            .into_iter()
            .find(|item| item.id == command.item_id)
            .ok_or_else(|| anyhow!("Shopping item not found: {}", command.item_id))?;

        item.purchased = !item.purchased;
        self.shopping_repository.update_item(&item).await?;
        info!(
            "🛒 Marked {} as {}",
            item.id,
            if item.purchased { "purchased" } else { "not purchased" }
        );
        Ok(item)
    }

    pub async fn delete_items(&self, command: DeleteRecordsCommand) -> Result<DeleteRecordsResult> {
        let existing_ids = self
            .shopping_repository
            .check_items_exist(&command.ids)
            .await?;
        let not_found_ids: Vec<String> = command
            .ids
            .iter()
            .filter(|id| !existing_ids.contains(id))
            .cloned()
            .collect();

        let deleted_count = if !existing_ids.is_empty() {
            self.shopping_repository.delete_items(&existing_ids).await?
        } else {
            0
        };

        let success_message = match deleted_count {
            0 => "No items were deleted".to_string(),
            1 => "1 item deleted successfully".to_string(),
            n => format!("{} items deleted successfully", n),
        };

        Ok(DeleteRecordsResult {
            deleted_count: deleted_count as usize,
            not_found_ids,
            success_message,
        })
    }

    /// Drop everything already bought. Returns how many items went away.
    pub async fn clear_purchased(&self) -> Result<u32> {
        let removed = self.shopping_repository.remove_purchased().await?;
        if removed > 0 {
            info!("🛒 Cleared {} purchased item(s)", removed);
        }
        Ok(removed)
    }
}
