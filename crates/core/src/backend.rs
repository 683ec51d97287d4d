//! Remote per-account store seams.
//!
//! The managers talk to the remote store through these traits so the sync
//! policy can be tested against hand-rolled fakes; the HTTP implementations
//! live in `gearcart-client`.

use async_trait::async_trait;

use crate::domain::accessory::{Accessory, AccessoryId, CartLine};
use crate::errors::BackendError;

#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Full remote cart state; the replacement copy after a successful write.
    async fn fetch(&self) -> Result<Vec<CartLine>, BackendError>;
    async fn add(&self, id: &AccessoryId, quantity: u32) -> Result<(), BackendError>;
    async fn set_quantity(&self, id: &AccessoryId, quantity: u32) -> Result<(), BackendError>;
    async fn remove(&self, id: &AccessoryId) -> Result<(), BackendError>;
    async fn clear(&self) -> Result<(), BackendError>;
}

#[async_trait]
pub trait WishlistBackend: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Accessory>, BackendError>;
    async fn add(&self, id: &AccessoryId) -> Result<(), BackendError>;
    async fn remove(&self, id: &AccessoryId) -> Result<(), BackendError>;
    async fn clear(&self) -> Result<(), BackendError>;
}
