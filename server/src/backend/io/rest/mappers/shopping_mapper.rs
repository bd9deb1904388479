use shared::{CreateShoppingItemRequest, ShoppingItem};

use crate::backend::domain::{
    commands::shopping::CreateShoppingItemCommand,
    models::shopping_item::ShoppingItem as DomainShoppingItem,
};

pub struct ShoppingMapper;

impl ShoppingMapper {
    pub fn to_dto(item: DomainShoppingItem) -> ShoppingItem {
        ShoppingItem {
            id: item.id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            estimated_cost: item.estimated_cost,
            purchased: item.purchased,
            created_at: item.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreateShoppingItemRequest) -> CreateShoppingItemCommand {
        CreateShoppingItemCommand {
            name: request.name,
            category: request.category,
            quantity: request.quantity,
            estimated_cost: request.estimated_cost,
        }
    }
}
