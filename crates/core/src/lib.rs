pub mod auth;
pub mod backend;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod domain;
pub mod errors;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use auth::{AuthSession, UserIdentity};
pub use backend::{CartBackend, WishlistBackend};
pub use cart::CartManager;
pub use checkout::{begin_checkout, CheckoutError, CheckoutIntent};
pub use domain::accessory::{Accessory, AccessoryId, CartLine};
pub use domain::profile::{
    AspectPriorities, ProfileValidationError, SentimentPreference, UserProfile,
};
pub use errors::BackendError;
pub use session::SessionProfileStore;
pub use storage::{keys, FileStore, KeyValueStore, MemoryStore};
pub use wishlist::WishlistManager;
