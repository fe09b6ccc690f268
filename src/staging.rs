//! Per-item quantities the user has dialed in but not yet added to the cart.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::ItemId;

/// Quantity an item shows before the user touches it.
pub const DEFAULT_STAGED: u32 = 1;

/// UI-local staging counters. Never synchronized with the store.
#[derive(Debug, Default)]
pub struct StagingArea {
    quantities: Mutex<HashMap<ItemId, u32>>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self, id: ItemId) -> u32 {
        let quantities = self.quantities.lock().unwrap_or_else(PoisonError::into_inner);
        quantities.get(&id).copied().unwrap_or(DEFAULT_STAGED)
    }

    /// Adds `delta` to the staged quantity of `id`, never going below one.
    pub fn adjust(&self, id: ItemId, delta: i64) -> u32 {
        let mut quantities = self.quantities.lock().unwrap_or_else(PoisonError::into_inner);
        let current = quantities.get(&id).copied().unwrap_or(DEFAULT_STAGED);
        let next = i64::from(current).saturating_add(delta).clamp(1, i64::from(u32::MAX)) as u32;
        quantities.insert(id, next);
        next
    }

    #[cfg(test)]
    pub fn set(&self, id: ItemId, quantity: u32) {
        let mut quantities = self.quantities.lock().unwrap_or_else(PoisonError::into_inner);
        quantities.insert(id, quantity);
    }

    /// Puts every counter back to its default.
    pub fn reset(&self) {
        self.quantities.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
