//! Cached credential and identity, shared view over the durable store.
//!
//! Token issuance is external; this module only caches what the auth
//! endpoints returned. Presence of the token is what routes cart and
//! wishlist mutations through the remote per-account store.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{keys, KeyValueStore};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<SecretString> {
        self.store.get(keys::AUTH_TOKEN).map(SecretString::from)
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(keys::AUTH_TOKEN).is_some()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        let raw = self.store.get(keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(error) => {
                warn!(
                    event_name = "auth.identity.corrupt",
                    error = %error,
                    "cached identity is unreadable, treating as absent"
                );
                None
            }
        }
    }

    pub fn login(&self, token: &SecretString, identity: &UserIdentity) {
        self.store.set(keys::AUTH_TOKEN, token.expose_secret());
        match serde_json::to_string(identity) {
            Ok(serialized) => self.store.set(keys::USER, &serialized),
            Err(error) => warn!(
                event_name = "auth.identity.serialize_failed",
                error = %error,
                "could not cache identity"
            ),
        }
    }

    /// Clears the credential together with every account-scoped key: token,
    /// cached identity, cart, and wishlist.
    pub fn logout(&self) {
        self.store.remove(keys::AUTH_TOKEN);
        self.store.remove(keys::USER);
        self.store.remove(keys::CART);
        self.store.remove(keys::WISHLIST);
    }
}
