use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::domain::{CartItem, CartItemCreate, CartItemPatch, InventoryItem, ItemId};
use super::{RemoteCartService, RemoteError};

/// Remote cart service speaking JSON to a REST store.
///
/// Routes: `GET /inventory`, `GET /cart`, `POST /cart`, `PATCH /cart/{id}`,
/// `DELETE /cart/{id}`.
#[derive(Clone)]
pub struct HttpCartService {
    http: Client,
    base_url: String,
}

impl HttpCartService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl RemoteCartService for HttpCartService {
    #[instrument(skip(self))]
    async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, RemoteError> {
        debug!("Sending request");
        let response = self.http.get(self.endpoint("inventory")).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, RemoteError> {
        debug!("Sending request");
        let response = self.http.get(self.endpoint("cart")).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    #[instrument(skip(self), fields(item_id = item.id, amount = item.amount))]
    async fn create_cart_item(&self, item: CartItemCreate) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        let response = self
            .http
            .post(self.endpoint("cart"))
            .json(&item)
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    #[instrument(skip(self))]
    async fn update_cart_item(&self, id: ItemId, amount: u32) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        let response = self
            .http
            .patch(self.endpoint(&format!("cart/{id}")))
            .json(&CartItemPatch { amount })
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    #[instrument(skip(self))]
    async fn delete_cart_item(&self, id: ItemId) -> Result<(), RemoteError> {
        debug!("Sending request");
        let response = self
            .http
            .delete(self.endpoint(&format!("cart/{id}")))
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}
