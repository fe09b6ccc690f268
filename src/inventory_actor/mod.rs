//! Read-only catalog records served by the in-process store.

pub mod entity;

use crate::domain::InventoryItem;

/// Catalog the in-process store starts with when no remote store is configured.
pub fn demo_inventory() -> Vec<InventoryItem> {
    ["Apple", "Banana", "Cherry", "Durian", "Elderberry"]
        .into_iter()
        .zip(1..)
        .map(|(content, id)| InventoryItem::new(id, content))
        .collect()
}
