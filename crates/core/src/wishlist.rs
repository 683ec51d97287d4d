//! Wishlist state manager: same dual-persistence pattern as the cart, minus
//! quantities. The collection behaves as a set keyed on accessory id.

use std::sync::Arc;

use tracing::warn;

use crate::auth::AuthSession;
use crate::backend::WishlistBackend;
use crate::cart::CartManager;
use crate::domain::accessory::{Accessory, AccessoryId};
use crate::errors::BackendError;
use crate::storage::{keys, KeyValueStore};

pub struct WishlistManager {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn WishlistBackend>,
    session: AuthSession,
    items: Vec<Accessory>,
}

impl WishlistManager {
    /// Same bootstrap contract as [`CartManager::open`]: local seed first,
    /// then a server-wins resync when a credential is present.
    pub async fn open(store: Arc<dyn KeyValueStore>, backend: Arc<dyn WishlistBackend>) -> Self {
        let session = AuthSession::new(Arc::clone(&store));
        let items = load_local(store.as_ref());
        let mut manager = Self { store, backend, session, items };
        manager.sync().await;
        manager
    }

    pub async fn sync(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.adopt_remote("wishlist.sync").await;
    }

    /// Idempotent: adding an id that is already present is a no-op and does
    /// not touch either persistence backend.
    pub async fn add(&mut self, accessory: Accessory) {
        let id = accessory.accessory_id.clone();
        if self.contains(&id) {
            return;
        }
        self.items.push(accessory);
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.add(&id).await;
        self.reconcile("wishlist.add", outcome).await;
    }

    pub async fn remove(&mut self, id: &AccessoryId) {
        self.items.retain(|item| &item.accessory_id != id);
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.remove(id).await;
        self.reconcile("wishlist.remove", outcome).await;
    }

    pub async fn clear(&mut self) {
        self.items.clear();
        self.persist_local();

        if !self.session.is_authenticated() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let outcome = backend.clear().await;
        self.reconcile("wishlist.clear", outcome).await;
    }

    /// Compound move: add to the cart (repeat-add semantics) then remove
    /// from the wishlist. Returns `false` without touching anything when the
    /// id is not wishlisted.
    pub async fn move_to_cart(&mut self, id: &AccessoryId, cart: &mut CartManager) -> bool {
        let Some(accessory) = self.items.iter().find(|item| &item.accessory_id == id).cloned()
        else {
            return false;
        };
        cart.add(accessory).await;
        self.remove(id).await;
        true
    }

    pub fn items(&self) -> &[Accessory] {
        &self.items
    }

    pub fn contains(&self, id: &AccessoryId) -> bool {
        self.items.iter().any(|item| &item.accessory_id == id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    async fn reconcile(&mut self, operation: &str, outcome: Result<(), BackendError>) {
        match outcome {
            Ok(()) => self.adopt_remote(operation).await,
            Err(error) => warn!(
                event_name = "wishlist.remote.write_failed",
                operation,
                error = %error,
                "remote wishlist write failed, keeping optimistic local state"
            ),
        }
    }

    async fn adopt_remote(&mut self, operation: &str) {
        let backend = Arc::clone(&self.backend);
        match backend.fetch().await {
            Ok(items) => {
                self.items = items;
                self.persist_local();
            }
            Err(error) => warn!(
                event_name = "wishlist.remote.fetch_failed",
                operation,
                error = %error,
                "could not adopt server wishlist state, keeping local state"
            ),
        }
    }

    fn persist_local(&self) {
        match serde_json::to_string(&self.items) {
            Ok(serialized) => self.store.set(keys::WISHLIST, &serialized),
            Err(error) => warn!(
                event_name = "wishlist.persist.serialize_failed",
                error = %error,
                "could not mirror wishlist to local store"
            ),
        }
    }
}

fn load_local(store: &dyn KeyValueStore) -> Vec<Accessory> {
    let Some(raw) = store.get(keys::WISHLIST) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(error) => {
            warn!(
                event_name = "wishlist.seed.corrupt",
                error = %error,
                "stored wishlist is unreadable, starting empty"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::backend::{CartBackend, WishlistBackend};
    use crate::cart::CartManager;
    use crate::domain::accessory::{Accessory, AccessoryId, CartLine};
    use crate::errors::BackendError;
    use crate::storage::{keys, KeyValueStore, MemoryStore};

    use super::WishlistManager;

    #[derive(Default)]
    struct FakeWishlistBackend {
        remote_items: Mutex<Vec<Accessory>>,
        fail_writes: bool,
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WishlistBackend for FakeWishlistBackend {
        async fn fetch(&self) -> Result<Vec<Accessory>, BackendError> {
            Ok(self.remote_items.lock().expect("lock").clone())
        }

        async fn add(&self, id: &AccessoryId) -> Result<(), BackendError> {
            self.write_outcome(format!("add {id}"))
        }

        async fn remove(&self, id: &AccessoryId) -> Result<(), BackendError> {
            self.write_outcome(format!("remove {id}"))
        }

        async fn clear(&self) -> Result<(), BackendError> {
            self.write_outcome("clear".to_string())
        }
    }

    impl FakeWishlistBackend {
        fn write_outcome(&self, call: String) -> Result<(), BackendError> {
            if self.fail_writes {
                return Err(BackendError::Transport("connection refused".to_string()));
            }
            self.writes.lock().expect("lock").push(call);
            Ok(())
        }
    }

    /// Cart double that accepts everything; the wishlist tests only assert
    /// on cart contents through the manager.
    #[derive(Default)]
    struct AcceptingCartBackend;

    #[async_trait]
    impl CartBackend for AcceptingCartBackend {
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

    fn accessory(id: &str, price: i64) -> Accessory {
        Accessory::new(id, format!("Accessory {id}"), Decimal::from(price))
    }

    async fn anonymous_manager() -> (WishlistManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let manager = WishlistManager::open(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(FakeWishlistBackend::default()),
        )
        .await;
        (manager, store)
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let (mut wishlist, _store) = anonymous_manager().await;

        wishlist.add(accessory("ACC-1", 100)).await;
        wishlist.add(accessory("ACC-1", 100)).await;

        assert_eq!(wishlist.count(), 1);
        assert!(wishlist.contains(&AccessoryId::from("ACC-1")));
    }

    #[tokio::test]
    async fn remove_and_clear_empty_the_set() {
        let (mut wishlist, _store) = anonymous_manager().await;
        wishlist.add(accessory("ACC-1", 100)).await;
        wishlist.add(accessory("ACC-2", 250)).await;

        wishlist.remove(&AccessoryId::from("ACC-1")).await;
        assert_eq!(wishlist.count(), 1);

        wishlist.clear().await;
        assert!(wishlist.is_empty());
    }

    #[tokio::test]
    async fn mutations_mirror_to_the_local_store() {
        let (mut wishlist, store) = anonymous_manager().await;
        wishlist.add(accessory("ACC-1", 100)).await;

        let raw = store.get(keys::WISHLIST).expect("wishlist key");
        let persisted: Vec<Accessory> = serde_json::from_str(&raw).expect("parse");
        assert_eq!(persisted, wishlist.items());
    }

    #[tokio::test]
    async fn move_to_cart_satisfies_both_postconditions() {
        let store = Arc::new(MemoryStore::default());
        let mut wishlist = WishlistManager::open(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(FakeWishlistBackend::default()),
        )
        .await;
        let mut cart = CartManager::open(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(AcceptingCartBackend),
        )
        .await;
        wishlist.add(accessory("ACC-1", 100)).await;

        let moved = wishlist.move_to_cart(&AccessoryId::from("ACC-1"), &mut cart).await;

        assert!(moved);
        assert!(cart.contains(&AccessoryId::from("ACC-1")));
        assert_eq!(cart.count(), 1);
        assert!(!wishlist.contains(&AccessoryId::from("ACC-1")));
    }

    #[tokio::test]
    async fn move_to_cart_of_unlisted_id_changes_nothing() {
        let store = Arc::new(MemoryStore::default());
        let mut wishlist = WishlistManager::open(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(FakeWishlistBackend::default()),
        )
        .await;
        let mut cart = CartManager::open(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(AcceptingCartBackend),
        )
        .await;

        let moved = wishlist.move_to_cart(&AccessoryId::from("ACC-404"), &mut cart).await;

        assert!(!moved);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn successful_remote_add_adopts_the_server_version() {
        let store = Arc::new(MemoryStore::default());
        store.set(keys::AUTH_TOKEN, "tok-1");
        // The server's view differs from the naive optimistic merge; after a
        // successful write the manager must adopt it verbatim.
        let server = vec![accessory("ACC-1", 90)];
        let backend = Arc::new(FakeWishlistBackend {
            remote_items: Mutex::new(server.clone()),
            ..FakeWishlistBackend::default()
        });

        let mut wishlist =
            WishlistManager::open(Arc::clone(&store) as Arc<dyn KeyValueStore>, backend.clone())
                .await;
        wishlist.add(accessory("ACC-2", 250)).await;

        assert_eq!(wishlist.items(), server.as_slice());
        assert_eq!(backend.writes.lock().expect("lock").as_slice(), ["add ACC-2"]);
    }

    #[tokio::test]
    async fn remote_write_failure_falls_back_to_the_optimistic_path() {
        let store = Arc::new(MemoryStore::default());
        store.set(keys::AUTH_TOKEN, "tok-1");
        let backend = FakeWishlistBackend { fail_writes: true, ..FakeWishlistBackend::default() };

        let mut wishlist =
            WishlistManager::open(Arc::clone(&store) as Arc<dyn KeyValueStore>, Arc::new(backend))
                .await;
        wishlist.add(accessory("ACC-1", 100)).await;

        assert_eq!(wishlist.items(), [accessory("ACC-1", 100)].as_slice());
    }
}
