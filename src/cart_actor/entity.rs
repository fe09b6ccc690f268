use crate::actor_framework::Entity;
use crate::domain::{CartItem, CartItemCreate, CartItemPatch, ItemId};

impl Entity for CartItem {
    type Id = ItemId;
    type CreatePayload = CartItemCreate;
    type Patch = CartItemPatch;

    fn id(&self) -> &ItemId { &self.id }

    /// Creates a cart entry keyed by the inventory id in the payload.
    ///
    /// # Errors
    /// Rejects an amount of zero.
    fn from_create(params: CartItemCreate) -> Result<Self, String> {
        validate_amount(params.amount)?;
        Ok(params.into())
    }

    /// Replaces the amount of the entry.
    fn on_update(&mut self, patch: CartItemPatch) -> Result<(), String> {
        validate_amount(patch.amount)?;
        self.amount = patch.amount;
        Ok(())
    }
}

fn validate_amount(amount: u32) -> Result<(), String> {
    if amount == 0 {
        Err("Invalid amount: a cart entry needs at least one unit".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amount_is_rejected() {
        let create = CartItemCreate { id: 1, content: "Apple".into(), amount: 0 };
        assert!(CartItem::from_create(create).is_err());

        let mut item = CartItem::new(1, "Apple", 2);
        assert!(item.on_update(CartItemPatch { amount: 0 }).is_err());
        assert_eq!(item.amount, 2);

        item.on_update(CartItemPatch { amount: 5 }).unwrap();
        assert_eq!(item.amount, 5);
    }
}
