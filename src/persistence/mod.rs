//! The `persistence` module keeps the last confirmed subscription state of
//! every topic across process restarts.
//!
//! `PreferenceStore` is the narrow key-value contract (one boolean per key).
//! `SledStore` is the durable implementation and `MemoryStore` a process-local
//! one. `SubscriptionStore` sits on top and exposes the operations the
//! coordinator needs: "was this key ever written" and "what was written".

pub mod memory_store;
pub mod sled_store;
pub mod subscription_store;

pub use memory_store::MemoryStore;
pub use sled_store::SledStore;
pub use subscription_store::SubscriptionStore;

use crate::utils::error::StoreError;

/// Synchronous, single-key boolean store.
///
/// Writes must be durable by the time `put` returns; keys are independent and
/// no cross-key atomicity is expected.
pub trait PreferenceStore: Send + Sync {
    /// Returns `None` when `key` has never been written.
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError>;

    fn put(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: bool) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

#[cfg(test)]
mod tests;
