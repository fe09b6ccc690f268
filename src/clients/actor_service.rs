use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{CartItem, CartItemCreate, CartItemPatch, InventoryItem, ItemId};
use super::{RemoteCartService, RemoteError};

/// Remote cart service backed by the in-process resource actors.
#[derive(Clone)]
pub struct ActorCartService {
    inventory: ResourceClient<InventoryItem>,
    cart: ResourceClient<CartItem>,
}

impl ActorCartService {
    pub fn new(inventory: ResourceClient<InventoryItem>, cart: ResourceClient<CartItem>) -> Self {
        Self { inventory, cart }
    }
}

#[async_trait]
impl RemoteCartService for ActorCartService {
    #[instrument(skip(self))]
    async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, RemoteError> {
        debug!("Sending request");
        Ok(self.inventory.list().await?)
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, RemoteError> {
        debug!("Sending request");
        Ok(self.cart.list().await?)
    }

    #[instrument(skip(self), fields(item_id = item.id, amount = item.amount))]
    async fn create_cart_item(&self, item: CartItemCreate) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        Ok(self.cart.create(item).await?)
    }

    #[instrument(skip(self))]
    async fn update_cart_item(&self, id: ItemId, amount: u32) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        Ok(self.cart.update(id, CartItemPatch { amount }).await?)
    }

    #[instrument(skip(self))]
    async fn delete_cart_item(&self, id: ItemId) -> Result<(), RemoteError> {
        debug!("Sending request");
        Ok(self.cart.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_update};

    #[tokio::test]
    async fn test_update_sends_patch() {
        let (inventory, _inventory_rx) = create_mock_client::<InventoryItem>(4);
        let (cart, mut cart_rx) = create_mock_client::<CartItem>(4);
        let service = ActorCartService::new(inventory, cart);

        let task = tokio::spawn(async move { service.update_cart_item(3, 4).await });

        let (id, patch, responder) = expect_update(&mut cart_rx).await.expect("Expected Update");
        assert_eq!(id, 3);
        assert_eq!(patch, CartItemPatch { amount: 4 });
        responder.send(Ok(CartItem::new(3, "Cherry", 4))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(CartItem::new(3, "Cherry", 4)));
    }

    #[tokio::test]
    async fn test_rejection_maps_to_remote_error() {
        let (inventory, _inventory_rx) = create_mock_client::<InventoryItem>(4);
        let (cart, mut cart_rx) = create_mock_client::<CartItem>(4);
        let service = ActorCartService::new(inventory, cart);

        let task = tokio::spawn(async move { service.update_cart_item(3, 0).await });

        let (_, _, responder) = expect_update(&mut cart_rx).await.expect("Expected Update");
        responder
            .send(Err(crate::actor_framework::FrameworkError::Rejected("bad amount".into())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(RemoteError::Rejected("bad amount".into())));
    }
}
