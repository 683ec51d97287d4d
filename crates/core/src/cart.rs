//! Cart state manager: in-memory authoritative state with dual persistence.
//!
//! Every mutation applies to the in-memory copy first and write-through to
//! the durable local store, then attempts the remote per-account store iff a
//! credential is present. A successful remote write is followed by a full
//! refetch that replaces the local copy (server-wins), so the remote store
//! stays authoritative whenever it is reachable. A failed remote call leaves
//! the optimistic local result in place: no retry, no queue.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::auth::AuthSession;
use crate::backend::CartBackend;
use crate::domain::accessory::{Accessory, AccessoryId, CartLine};
use crate::errors::BackendError;
use crate::storage::{keys, KeyValueStore};

pub struct CartManager {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn CartBackend>,
    session: AuthSession,
    lines: Vec<CartLine>,
}

impl CartManager {
    /// Seeds in-memory state from the durable local store, then, when a
    /// credential is present, immediately resyncs against the remote store.
    /// The resync replaces the seed on success and silently keeps it on
    /// failure.
    pub async fn open(store: Arc<dyn KeyValueStore>, backend: Arc<dyn CartBackend>) -> Self {
        let session = AuthSession::new(Arc::clone(&store));
        let lines = load_local(store.as_ref());
        let mut manager = Self { store, backend, session, lines };
        manager.sync().await;
        manager
    }

    /// Replaces in-memory state with the remote store's version. No-op for
    /// anonymous sessions; keeps current state when the fetch fails.
    pub async fn sync(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.adopt_remote("cart.sync").await;
    }

    /// Repeat add increments the existing line's quantity; first add inserts
    /// a line with quantity 1. Never fails and performs no item validation.
    pub async fn add(&mut self, accessory: Accessory) {
        let id = accessory.accessory_id.clone();
        match self.lines.iter_mut().find(|line| line.accessory.accessory_id == id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { accessory, quantity: 1 }),
        }
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.add(&id, 1).await;
        self.reconcile("cart.add", outcome).await;
    }

    /// Deletes the line for `id` if present; silent no-op otherwise. The
    /// remote delete is still attempted for authenticated sessions because
    /// the server copy may hold lines this replica never saw.
    pub async fn remove(&mut self, id: &AccessoryId) {
        self.lines.retain(|line| &line.accessory.accessory_id != id);
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.remove(id).await;
        self.reconcile("cart.remove", outcome).await;
    }

    /// Zero removes the line. A non-zero update on an id that is not in the
    /// cart is a silent no-op rather than an insert; `add` is the only way a
    /// line comes into existence.
    pub async fn set_quantity(&mut self, id: &AccessoryId, quantity: u32) {
        if quantity == 0 {
            self.remove(id).await;
            return;
        }

        let Some(line) =
            self.lines.iter_mut().find(|line| &line.accessory.accessory_id == id)
        else {
            return;
        };
        line.quantity = quantity;
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.set_quantity(id, quantity).await;
        self.reconcile("cart.set_quantity", outcome).await;
    }

    pub async fn clear(&mut self) {
        self.lines.clear();
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.clear().await;
        self.reconcile("cart.clear", outcome).await;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn contains(&self, id: &AccessoryId) -> bool {
        self.lines.iter().any(|line| &line.accessory.accessory_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity over all lines, in exact decimal arithmetic.
    pub fn total(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, line| acc + line.subtotal())
    }

    /// Sum of quantities, not the number of distinct lines.
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    async fn reconcile(&mut self, operation: &str, outcome: Result<(), BackendError>) {
        match outcome {
            Ok(()) => self.adopt_remote(operation).await,
            Err(error) => warn!(
                event_name = "cart.remote.write_failed",
                operation,
                error = %error,
                "remote cart write failed, keeping optimistic local state"
            ),
        }
    }

    async fn adopt_remote(&mut self, operation: &str) {
        let backend = Arc::clone(&self.backend);
        match backend.fetch().await {
            Ok(lines) => {
                self.lines = lines;
                self.persist_local();
            }
            Err(error) => warn!(
                event_name = "cart.remote.fetch_failed",
                operation,
                error = %error,
                "could not adopt server cart state, keeping local state"
            ),
        }
    }

    fn persist_local(&self) {
        match serde_json::to_string(&self.lines) {
            Ok(serialized) => self.store.set(keys::CART, &serialized),
            Err(error) => warn!(
                event_name = "cart.persist.serialize_failed",
                error = %error,
                "could not mirror cart to local store"
            ),
        }
    }
}

fn load_local(store: &dyn KeyValueStore) -> Vec<CartLine> {
    let Some(raw) = store.get(keys::CART) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(lines) => lines,
        Err(error) => {
            warn!(
                event_name = "cart.seed.corrupt",
                error = %error,
                "stored cart is unreadable, starting empty"
            );
            Vec::new()
        }
    }
}
