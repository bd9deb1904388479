//! # REST API for the Shopping List
//!
//! Endpoints for adding, listing, toggling, and clearing shopping items.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use log::info;

use crate::backend::domain::commands::{
    shopping::ToggleShoppingItemCommand, DeleteRecordsCommand,
};
use crate::backend::io::rest::{domain_error_response, mappers::shopping_mapper::ShoppingMapper};
use crate::backend::AppState;
use shared::{
    ClearPurchasedResponse, CreateShoppingItemRequest, DeleteRecordsRequest,
    DeleteRecordsResponse, ShoppingListResponse, ToggleShoppingItemRequest,
    ToggleShoppingItemResponse,
};

/// Create a router for shopping list APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(add_item).delete(delete_items))
        .route("/toggle", put(toggle_item))
        .route("/clear-purchased", post(clear_purchased))
}

/// List shopping items, unpurchased first
pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/shopping");

    match state.shopping_service.list_items().await {
        Ok(items) => {
            let response = ShoppingListResponse {
                items: items.into_iter().map(ShoppingMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error listing shopping items"),
    }
}

/// Add a new shopping item
pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<CreateShoppingItemRequest>,
) -> impl IntoResponse {
    info!("POST /api/shopping - request: {:?}", request);

    let command = ShoppingMapper::to_create_command(request);
    match state.shopping_service.add_item(command).await {
        Ok(item) => (StatusCode::CREATED, Json(ShoppingMapper::to_dto(item))).into_response(),
        Err(e) => domain_error_response(&state, e, "Error adding shopping item"),
    }
}

/// Flip an item's purchased flag
pub async fn toggle_item(
    State(state): State<AppState>,
    Json(request): Json<ToggleShoppingItemRequest>,
) -> impl IntoResponse {
    info!("PUT /api/shopping/toggle - item: {}", request.item_id);

    let command = ToggleShoppingItemCommand {
        item_id: request.item_id,
    };
    match state.shopping_service.toggle_purchased(command).await {
        Ok(item) => {
            let success_message = if item.purchased {
                format!("{} marked as purchased", item.name)
            } else {
                format!("{} moved back to the list", item.name)
            };
            let response = ToggleShoppingItemResponse {
                item: ShoppingMapper::to_dto(item),
                success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) if e.to_string().contains("not found") => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error toggling shopping item"),
    }
}

/// Delete multiple shopping items
pub async fn delete_items(
    State(state): State<AppState>,
    Json(request): Json<DeleteRecordsRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/shopping - request: {:?}", request);

    let command = DeleteRecordsCommand { ids: request.ids };
    match state.shopping_service.delete_items(command).await {
        Ok(result) => {
            let response = DeleteRecordsResponse {
                deleted_count: result.deleted_count,
                success_message: result.success_message,
                not_found_ids: result.not_found_ids,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error deleting shopping items"),
    }
}

/// Remove every purchased item from the list
pub async fn clear_purchased(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/shopping/clear-purchased");

    match state.shopping_service.clear_purchased().await {
        Ok(removed) => {
            let success_message = match removed {
                0 => "Nothing to clear".to_string(),
                1 => "1 purchased item cleared".to_string(),
                n => format!("{} purchased items cleared", n),
            };
            let response = ClearPurchasedResponse {
                removed_count: removed as usize,
                success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(&state, e, "Error clearing purchased items"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_utils::test_app_state;

    #[tokio::test]
    async fn test_add_and_toggle_item() {
        let (state, _dir) = test_app_state();

        let request = CreateShoppingItemRequest {
            name: "Milk".to_string(),
            category: "Groceries".to_string(),
            quantity: None,
            estimated_cost: None,
        };
        let response = add_item(State(state.clone()), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);

        let items = state.shopping_service.list_items().await.unwrap();
        let toggle_request = ToggleShoppingItemRequest {
            item_id: items[0].id.clone(),
        };
        let response = toggle_item(State(state), Json(toggle_request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_toggle_unknown_item_is_404() {
        let (state, _dir) = test_app_state();

        let request = ToggleShoppingItemRequest {
            item_id: "item::404".to_string(),
        };
        let response = toggle_item(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }
}
