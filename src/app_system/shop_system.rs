use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::{Dispatcher, Settings};
use crate::clients::{ActorCartService, HttpCartService, RemoteCartService};
use crate::controller::{CartController, CartError};
use crate::domain::CartItem;
use crate::inventory_actor::demo_inventory;
use crate::staging::StagingArea;
use crate::state::ObservableState;
use crate::view::View;

/// One shopping session: state, staging, controller and the view they drive.
///
/// Responsible for starting the in-process store when no remote one is
/// configured, wiring the render subscription, and handling shutdown.
pub struct ShopSystem {
    controller: Arc<CartController>,
    view: Arc<dyn View>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    pub fn new(settings: &Settings, view: Arc<dyn View>) -> Self {
        let mut handles = Vec::new();

        let remote: Arc<dyn RemoteCartService> = match &settings.api_url {
            Some(url) => {
                info!(api_url = %url, "Using remote store");
                Arc::new(HttpCartService::new(url.clone()))
            }
            None => {
                info!("Starting in-process store");
                let (inventory_actor, inventory_client) =
                    ResourceActor::with_items("inventory", settings.channel_buffer, demo_inventory());
                let (cart_actor, cart_client) =
                    ResourceActor::<CartItem>::new("cart", settings.channel_buffer);
                handles.push(tokio::spawn(inventory_actor.run()));
                handles.push(tokio::spawn(cart_actor.run()));
                Arc::new(ActorCartService::new(inventory_client, cart_client))
            }
        };

        Self::with_remote(remote, view, handles)
    }

    /// Builds a session over an already running store.
    pub fn with_remote(
        remote: Arc<dyn RemoteCartService>,
        view: Arc<dyn View>,
        handles: Vec<tokio::task::JoinHandle<()>>,
    ) -> Self {
        let state = Arc::new(ObservableState::new());
        let staging = Arc::new(StagingArea::new());

        let weak_state = Arc::downgrade(&state);
        let listener_staging = staging.clone();
        let listener_view = view.clone();
        state.subscribe(move || {
            let Some(state) = weak_state.upgrade() else {
                return;
            };
            // Redrawn inventory rows start their counters from scratch.
            listener_staging.reset();
            listener_view.render_inventory(&state.inventory(), &listener_staging);
            listener_view.render_cart(&state.cart());
        });

        let controller = Arc::new(CartController::new(remote, state, staging));
        Self {
            controller,
            view,
            handles,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &Arc<CartController> {
        &self.controller
    }

    /// Runs the initial load of inventory and cart.
    pub async fn start(&self) -> Result<(), CartError> {
        info!("Loading shop");
        self.controller.initialize().await
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.controller.clone(), self.view.clone())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down session...");
        // Dropping the controller drops the store clients, which closes the
        // actor channels and lets the actors finish.
        drop(self.controller);
        drop(self.view);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
