use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{InventoryItem, ItemId};

/// Inventory is owned by the store; clients can list it but never change it.
///
/// `Patch` is uninhabited, so no update request can be built for it.
impl Entity for InventoryItem {
    type Id = ItemId;
    type CreatePayload = InventoryItem;
    type Patch = Infallible;

    fn id(&self) -> &ItemId { &self.id }

    fn from_create(_params: InventoryItem) -> Result<Self, String> {
        Err("Inventory is read-only".to_string())
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), String> {
        match patch {}
    }

    fn on_delete(&self) -> Result<(), String> {
        Err("Inventory is read-only".to_string())
    }
}
