use serde::{Deserialize, Serialize};

use super::{InventoryItem, ItemId};

/// An entry in the cart. Keyed by the id of the inventory item it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub content: String,
    pub amount: u32,
}

/// Payload for creating a cart entry.
///
/// Serialized as the request body of `POST /cart`, so the field layout
/// matches [`CartItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub id: ItemId,
    pub content: String,
    pub amount: u32,
}

/// Payload for changing the amount of an existing cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemPatch {
    pub amount: u32,
}

impl CartItem {
    pub fn new(id: ItemId, content: impl Into<String>, amount: u32) -> Self {
        Self {
            id,
            content: content.into(),
            amount,
        }
    }
}

impl CartItemCreate {
    /// Builds the create payload for `amount` units of an inventory item.
    pub fn from_inventory(item: &InventoryItem, amount: u32) -> Self {
        Self {
            id: item.id,
            content: item.content.clone(),
            amount,
        }
    }
}

impl From<CartItemCreate> for CartItem {
    fn from(create: CartItemCreate) -> Self {
        Self {
            id: create.id,
            content: create.content,
            amount: create.amount,
        }
    }
}
