use serde::{Deserialize, Serialize};

/// Identifier shared by an inventory item and its cart entry.
pub type ItemId = u32;

/// A purchasable item from the store catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub content: String,
}

impl InventoryItem {
    pub fn new(id: ItemId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}
