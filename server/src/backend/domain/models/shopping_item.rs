use chrono::{DateTime, Utc};

/// One entry on the shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub estimated_cost: Option<f64>,
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
}
