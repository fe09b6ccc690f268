use async_trait::async_trait;

use crate::domain::{CartItem, CartItemCreate, InventoryItem, ItemId};
use super::RemoteError;

/// CRUD access to the store that owns the inventory and the cart.
///
/// Every call is a round trip that may fail independently of the others.
#[async_trait]
pub trait RemoteCartService: Send + Sync {
    async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, RemoteError>;

    async fn fetch_cart(&self) -> Result<Vec<CartItem>, RemoteError>;

    async fn create_cart_item(&self, item: CartItemCreate) -> Result<CartItem, RemoteError>;

    /// Sets the stored amount of cart entry `id` to `amount`.
    async fn update_cart_item(&self, id: ItemId, amount: u32) -> Result<CartItem, RemoteError>;

    async fn delete_cart_item(&self, id: ItemId) -> Result<(), RemoteError>;
}
