//! Reconciliation of the local cart with the remote store.
//!
//! Every mutating intent is a remote call followed by a local replacement of
//! the cart. The replacement is derived from what the call confirmed and is
//! only applied once it has resolved successfully; a failed call leaves the
//! state exactly as it was.

mod error;

pub use error::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, error, info, instrument};

use crate::clients::RemoteCartService;
use crate::domain::{CartItem, CartItemCreate, ItemId};
use crate::staging::StagingArea;
use crate::state::ObservableState;

/// Orchestrates cart intents against the remote store.
///
/// Operations on the same item id are serialized: the second of two
/// overlapping adds waits for the first to resolve, then reads the cart it
/// produced. Operations on different ids run concurrently.
pub struct CartController {
    remote: Arc<dyn RemoteCartService>,
    state: Arc<ObservableState>,
    staging: Arc<StagingArea>,
    item_locks: ItemLocks,
}

type ItemLocks = Mutex<HashMap<ItemId, Arc<AsyncMutex<()>>>>;

/// Exclusive hold on one item id. The map entry goes away with the last holder.
struct ItemGuard<'a> {
    id: ItemId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a ItemLocks,
}

impl Drop for ItemGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Clones are only taken under the map lock, so the count is stable here.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(&self.id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&self.id);
        }
    }
}

impl CartController {
    pub fn new(
        remote: Arc<dyn RemoteCartService>,
        state: Arc<ObservableState>,
        staging: Arc<StagingArea>,
    ) -> Self {
        Self {
            remote,
            state,
            staging,
            item_locks: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &Arc<ObservableState> {
        &self.state
    }

    #[cfg(test)]
    pub fn staging(&self) -> &Arc<StagingArea> {
        &self.staging
    }

    #[cfg(test)]
    fn held_item_locks(&self) -> usize {
        self.item_locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    async fn lock_item(&self, id: ItemId) -> ItemGuard<'_> {
        let lock = {
            let mut locks = self.item_locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(id).or_default().clone()
        };
        ItemGuard {
            id,
            guard: Some(lock.lock_owned().await),
            locks: &self.item_locks,
        }
    }

    /// Loads inventory and cart concurrently.
    ///
    /// Each collection is written as soon as its own fetch returns, so the
    /// two can land in either order and each triggers its own notification.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), CartError> {
        let inventory = async {
            let items = self.remote.fetch_inventory().await?;
            info!(count = items.len(), "Inventory loaded");
            self.state.set_inventory(items);
            Ok::<(), CartError>(())
        };
        let cart = async {
            let items = self.remote.fetch_cart().await?;
            info!(count = items.len(), "Cart loaded");
            self.state.set_cart(items);
            Ok::<(), CartError>(())
        };

        let (inventory, cart) = tokio::join!(inventory, cart);
        if let Err(e) = &inventory {
            error!(error = %e, "Failed to load inventory");
        }
        if let Err(e) = &cart {
            error!(error = %e, "Failed to load cart");
        }
        inventory.and(cart)
    }

    /// Moves the staged quantity of `id` by `delta`. Purely local.
    pub fn stage_quantity(&self, id: ItemId, delta: i64) -> u32 {
        let staged = self.staging.adjust(id, delta);
        debug!(item_id = id, staged, "Staged quantity changed");
        staged
    }

    /// Adds the staged quantity of `id` to the cart.
    ///
    /// Updates the existing entry's amount, or creates the entry if the cart
    /// has none for this id.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, id: ItemId) -> Result<(), CartError> {
        // Captured at call time; later staging changes do not affect this add.
        let staged = self.staging.staged(id);
        if staged == 0 {
            return Err(CartError::NothingStaged(id));
        }
        let item = self
            .state
            .inventory()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(CartError::NotFound(id))?;

        let _guard = self.lock_item(id).await;

        let existing = self
            .state
            .cart()
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.amount);

        match existing {
            Some(amount) => {
                let new_amount = amount.saturating_add(staged);
                self.remote.update_cart_item(id, new_amount).await?;

                self.state.update_cart(|cart| {
                    cart.iter()
                        .map(|entry| {
                            if entry.id == id {
                                CartItem {
                                    amount: entry.amount.saturating_add(staged),
                                    ..entry.clone()
                                }
                            } else {
                                entry.clone()
                            }
                        })
                        .collect()
                });
                info!(amount = new_amount, "Cart entry updated");
            }
            None => {
                let create = CartItemCreate::from_inventory(&item, staged);
                self.remote.create_cart_item(create.clone()).await?;

                self.state.update_cart(|cart| {
                    let mut next = cart.to_vec();
                    next.push(create.into());
                    next
                });
                info!(amount = staged, "Cart entry created");
            }
        }
        Ok(())
    }

    /// Removes the entry for `id` from the store, then from the local cart.
    #[instrument(skip(self))]
    pub async fn delete_from_cart(&self, id: ItemId) -> Result<(), CartError> {
        let _guard = self.lock_item(id).await;

        self.remote.delete_cart_item(id).await?;

        self.state
            .update_cart(|cart| cart.iter().filter(|entry| entry.id != id).cloned().collect());
        info!("Cart entry deleted");
        Ok(())
    }

    /// Deletes every entry of the current cart, then empties the local cart.
    ///
    /// Deletes are issued concurrently and all of them are awaited. The local
    /// cart is emptied only if every delete succeeded; otherwise it is left
    /// as it was, even though some entries may already be gone remotely.
    ///
    /// Only ids in the snapshot are locked. An add for a new id that lands
    /// while checkout is running is cleared locally but kept by the store.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<(), CartError> {
        let cart = self.state.cart();

        let mut ids: Vec<ItemId> = cart.iter().map(|entry| entry.id).collect();
        ids.sort_unstable();
        ids.dedup();

        // Ascending id order so concurrent checkouts cannot deadlock.
        let mut guards = Vec::with_capacity(ids.len());
        for id in &ids {
            guards.push(self.lock_item(*id).await);
        }

        let total = cart.len();
        let results = join_all(cart.iter().map(|entry| self.remote.delete_cart_item(entry.id))).await;
        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();

        if let Some(first) = failures.first() {
            return Err(CartError::CheckoutIncomplete {
                failed: failures.len(),
                total,
                first: first.clone(),
            });
        }

        self.state.set_cart(Vec::new());
        info!(entries = total, "Checkout complete");
        Ok(())
    }
}
