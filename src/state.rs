//! Observable container for the inventory and cart snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{CartItem, InventoryItem};

pub type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Snapshot {
    inventory: Arc<Vec<InventoryItem>>,
    cart: Arc<Vec<CartItem>>,
}

/// Holds the synchronized model and notifies one subscriber on every write.
///
/// Collections are only ever replaced whole. Readers get a shared handle to the
/// published snapshot, which is never mutated afterwards.
#[derive(Default)]
pub struct ObservableState {
    snapshot: Mutex<Snapshot>,
    listener: Mutex<Option<Listener>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ObservableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> Arc<Vec<InventoryItem>> {
        lock(&self.snapshot).inventory.clone()
    }

    pub fn cart(&self) -> Arc<Vec<CartItem>> {
        lock(&self.snapshot).cart.clone()
    }

    pub fn set_inventory(&self, inventory: Vec<InventoryItem>) {
        lock(&self.snapshot).inventory = Arc::new(inventory);
        self.notify();
    }

    pub fn set_cart(&self, cart: Vec<CartItem>) {
        lock(&self.snapshot).cart = Arc::new(cart);
        self.notify();
    }

    /// Replaces the cart with one derived from the current cart.
    ///
    /// Reading and replacing happen under one lock, so concurrent updates
    /// each see the other's result. The listener runs after the lock is
    /// released.
    pub fn update_cart(&self, derive: impl FnOnce(&[CartItem]) -> Vec<CartItem>) {
        {
            let mut snapshot = lock(&self.snapshot);
            let next = derive(&snapshot.cart);
            snapshot.cart = Arc::new(next);
        }
        self.notify();
    }

    /// Registers the listener, replacing any previous one.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        *lock(&self.listener) = Some(Arc::new(listener));
    }

    // Locks are released before the call so the listener can read the state.
    fn notify(&self) {
        let listener = lock(&self.listener).clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}
