use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::controller::{CartController, CartError};
use crate::domain::ItemId;
use crate::events::UiEvent;
use crate::view::View;

/// Routes input events to the controller.
///
/// Cloned into every in-flight intent so several can run at once.
#[derive(Clone)]
pub struct Dispatcher {
    controller: Arc<CartController>,
    view: Arc<dyn View>,
}

impl Dispatcher {
    pub fn new(controller: Arc<CartController>, view: Arc<dyn View>) -> Self {
        Self { controller, view }
    }

    /// Runs the intent behind `event`. Failures are logged, never returned:
    /// the user only sees that nothing changed.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, event: UiEvent) {
        let result = match event {
            UiEvent::Increment(id) => {
                self.stage(id, 1);
                Ok(())
            }
            UiEvent::Decrement(id) => {
                self.stage(id, -1);
                Ok(())
            }
            UiEvent::Add(id) => self.controller.add_to_cart(id).await,
            UiEvent::Delete(id) => self.controller.delete_from_cart(id).await,
            UiEvent::Checkout => self.controller.checkout().await,
        };
        log_outcome(result);
    }

    fn stage(&self, id: ItemId, delta: i64) {
        let quantity = self.controller.stage_quantity(id, delta);
        self.view.render_staged(id, quantity);
    }
}

fn log_outcome(result: Result<(), CartError>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_no_op() => debug!(error = %e, "Ignored event"),
        Err(e) => error!(error = %e, "Cart action failed"),
    }
}
