//! HTTP implementation of the remote wishlist store.

use async_trait::async_trait;
use gearcart_core::{Accessory, AccessoryId, BackendError, WishlistBackend};
use reqwest::Method;

use crate::types::{WishlistItemsResponse, WishlistMutation};
use crate::ApiClient;

pub struct HttpWishlistBackend {
    client: ApiClient,
}

impl HttpWishlistBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WishlistBackend for HttpWishlistBackend {
    async fn fetch(&self) -> Result<Vec<Accessory>, BackendError> {
        let response: WishlistItemsResponse = self
            .client
            .execute("wishlist.fetch", self.client.request(Method::GET, "/wishlist"))
            .await
            .map_err(BackendError::from)?;
        if !response.success {
            return Err(BackendError::Rejected(
                "wishlist fetch reported success=false".to_string(),
            ));
        }
        Ok(response.items)
    }

    async fn add(&self, id: &AccessoryId) -> Result<(), BackendError> {
        self.client
            .execute_unit(
                "wishlist.add",
                self.client
                    .request(Method::POST, "/wishlist")
                    .json(&WishlistMutation { accessory_id: id.clone() }),
            )
            .await
            .map_err(BackendError::from)
    }

    async fn remove(&self, id: &AccessoryId) -> Result<(), BackendError> {
        self.client
            .execute_unit(
                "wishlist.remove",
                self.client.request(Method::DELETE, &format!("/wishlist/{id}")),
            )
            .await
            .map_err(BackendError::from)
    }

    async fn clear(&self) -> Result<(), BackendError> {
        self.client
            .execute_unit("wishlist.clear", self.client.request(Method::DELETE, "/wishlist"))
            .await
            .map_err(BackendError::from)
    }
}
