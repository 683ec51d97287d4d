//! HTTP implementation of the remote cart store.

use async_trait::async_trait;
use gearcart_core::{AccessoryId, BackendError, CartBackend, CartLine};
use reqwest::Method;

use crate::types::{CartItemsResponse, CartMutation};
use crate::ApiClient;

pub struct HttpCartBackend {
    client: ApiClient,
}

impl HttpCartBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartBackend for HttpCartBackend {
    async fn fetch(&self) -> Result<Vec<CartLine>, BackendError> {
        let response: CartItemsResponse = self
            .client
            .execute("cart.fetch", self.client.request(Method::GET, "/cart"))
            .await
            .map_err(BackendError::from)?;
        if !response.success {
            return Err(BackendError::Rejected("cart fetch reported success=false".to_string()));
        }
        Ok(response.items)
    }

    async fn add(&self, id: &AccessoryId, quantity: u32) -> Result<(), BackendError> {
        self.client
            .execute_unit(
                "cart.add",
                self.client
                    .request(Method::POST, "/cart")
                    .json(&CartMutation { accessory_id: id.clone(), quantity }),
            )
            .await
            .map_err(BackendError::from)
    }

    async fn set_quantity(&self, id: &AccessoryId, quantity: u32) -> Result<(), BackendError> {
        self.client
            .execute_unit(
                "cart.set_quantity",
                self.client
                    .request(Method::PUT, "/cart")
                    .json(&CartMutation { accessory_id: id.clone(), quantity }),
            )
            .await
            .map_err(BackendError::from)
    }

    async fn remove(&self, id: &AccessoryId) -> Result<(), BackendError> {
        self.client
            .execute_unit(
                "cart.remove",
                self.client.request(Method::DELETE, &format!("/cart/{id}")),
            )
            .await
            .map_err(BackendError::from)
    }

    async fn clear(&self) -> Result<(), BackendError> {
        self.client
            .execute_unit("cart.clear", self.client.request(Method::DELETE, "/cart"))
            .await
            .map_err(BackendError::from)
    }
}
