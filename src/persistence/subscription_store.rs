use tracing::warn;

use super::PreferenceStore;
use crate::utils::error::StoreError;

/// Last confirmed subscription state per storage key.
///
/// This is an optimistic cache of broker state, not a source of truth. Reads
/// never fail: an unreadable record is logged and treated as absent.
#[derive(Debug, Clone)]
pub struct SubscriptionStore<S> {
    inner: S,
}

impl<S: PreferenceStore> SubscriptionStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// True iff a record exists for `key`, whatever its value.
    pub fn is_initialized(&self, key: &str) -> bool {
        self.read(key).is_some()
    }

    /// Stored value for `key`, or `default` when there is none.
    pub fn get(&self, key: &str, default: bool) -> bool {
        self.read(key).unwrap_or(default)
    }

    /// Create or overwrite the record for `key`. Durable once this returns `Ok`.
    pub fn put(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.inner.put(key, value)
    }

    fn read(&self, key: &str) -> Option<bool> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "unreadable subscription record, treating as absent");
                None
            }
        }
    }
}
