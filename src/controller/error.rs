use thiserror::Error;

use crate::clients::RemoteError;
use crate::domain::ItemId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Item not found: {0}")]
    NotFound(ItemId),
    #[error("Nothing staged for item {0}")]
    NothingStaged(ItemId),
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),
    #[error("Checkout incomplete: {failed} of {total} deletes failed (first: {first})")]
    CheckoutIncomplete {
        failed: usize,
        total: usize,
        first: RemoteError,
    },
}

impl CartError {
    /// Whether the error only means the intent pointed at nothing.
    ///
    /// The UI never offers such actions, so these are absorbed quietly.
    pub fn is_no_op(&self) -> bool {
        matches!(self, CartError::NotFound(_) | CartError::NothingStaged(_))
    }
}
