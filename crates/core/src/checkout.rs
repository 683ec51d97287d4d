//! Checkout navigation guard. Payment and order placement are external; this
//! module only decides whether the checkout surface may be entered and hands
//! it a snapshot of the cart.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartManager;
use crate::domain::accessory::CartLine;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,
}

/// Snapshot handed to the checkout surface.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutIntent {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub count: u32,
}

/// Navigation into checkout must not proceed for an empty cart; the error is
/// the user-visible "cart is empty" signal.
pub fn begin_checkout(cart: &CartManager) -> Result<CheckoutIntent, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(CheckoutIntent { lines: cart.lines().to_vec(), total: cart.total(), count: cart.count() })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::backend::CartBackend;
    use crate::cart::CartManager;
    use crate::domain::accessory::{Accessory, AccessoryId, CartLine};
    use crate::errors::BackendError;
    use crate::storage::{KeyValueStore, MemoryStore};

    use super::{begin_checkout, CheckoutError};

    struct NoRemote;

    #[async_trait]
    impl CartBackend for NoRemote {
        async fn fetch(&self) -> Result<Vec<CartLine>, BackendError> {
            Ok(Vec::new())
        }

        async fn add(&self, _id: &AccessoryId, _quantity: u32) -> Result<(), BackendError> {
            Ok(())
        }

        async fn set_quantity(&self, _id: &AccessoryId, _quantity: u32) -> Result<(), BackendError> {
            Ok(())
        }

        async fn remove(&self, _id: &AccessoryId) -> Result<(), BackendError> {
            Ok(())
        }

        async fn clear(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    async fn cart() -> CartManager {
        CartManager::open(
            Arc::new(MemoryStore::default()) as Arc<dyn KeyValueStore>,
            Arc::new(NoRemote),
        )
        .await
    }

    #[tokio::test]
    async fn empty_cart_blocks_checkout() {
        let cart = cart().await;
        assert_eq!(begin_checkout(&cart), Err(CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn non_empty_cart_yields_a_snapshot() {
        let mut cart = cart().await;
        cart.add(Accessory::new("ACC-1", "Dash Cam", Decimal::from(2500))).await;
        cart.add(Accessory::new("ACC-1", "Dash Cam", Decimal::from(2500))).await;

        let intent = begin_checkout(&cart).expect("checkout allowed");
        assert_eq!(intent.total, Decimal::from(5000));
        assert_eq!(intent.count, 2);
        assert_eq!(intent.lines.len(), 1);
    }
}
