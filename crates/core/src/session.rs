//! Single-slot, session-lifetime storage for the last-submitted search
//! profile. Backed by its own session-scoped store instance, never by the
//! durable cross-session store used for cart, wishlist, and credentials.

use std::sync::Arc;

use tracing::warn;

use crate::domain::profile::UserProfile;
use crate::storage::{keys, KeyValueStore};

pub struct SessionProfileStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrites the slot unconditionally; each new search submission
    /// replaces the previous profile.
    pub fn set(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(serialized) => self.store.set(keys::USER_PROFILE, &serialized),
            Err(error) => warn!(
                event_name = "session.profile.serialize_failed",
                error = %error,
                "could not store search profile"
            ),
        }
    }

    /// `None` is a control-flow signal for the results view: redirect back
    /// to the search form. A corrupt stored value also reads as `None`.
    pub fn get(&self) -> Option<UserProfile> {
        let raw = self.store.get(keys::USER_PROFILE)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!(
                    event_name = "session.profile.corrupt",
                    error = %error,
                    "stored search profile is unreadable, treating as absent"
                );
                None
            }
        }
    }

    pub fn clear(&self) {
        self.store.remove(keys::USER_PROFILE);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::domain::profile::UserProfile;
    use crate::storage::{keys, KeyValueStore, MemoryStore};

    use super::SessionProfileStore;

    fn slot() -> (SessionProfileStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (SessionProfileStore::new(Arc::clone(&store) as Arc<dyn KeyValueStore>), store)
    }

    #[test]
    fn empty_slot_reads_as_absent() {
        let (slot, _store) = slot();
        assert!(slot.get().is_none());
    }

    #[test]
    fn set_overwrites_the_previous_profile() {
        let (slot, _store) = slot();
        slot.set(&UserProfile::new("Toyota", Decimal::from(500), Decimal::from(10_000)));
        slot.set(&UserProfile::new("Honda", Decimal::from(800), Decimal::from(4_000)));

        let profile = slot.get().expect("profile");
        assert_eq!(profile.car_brand, "Honda");
    }

    #[test]
    fn corrupt_slot_reads_as_absent() {
        let (slot, store) = slot();
        store.set(keys::USER_PROFILE, "{broken");
        assert!(slot.get().is_none());
    }
}
