//! Persistence layer backed by `sled`
//!
//! Every topic's state lives under its storage key in a single
//! `subscriptions` tree. Values are JSON-encoded `SubscriptionRecord`s so the
//! time of the last confirmation is kept next to the boolean.
//!
//! `put` flushes the tree before returning: a crash right after the broker
//! confirmed a change must not lose the local record.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use uuid::Uuid;

use super::PreferenceStore;
use crate::utils::error::StoreError;

const SUBSCRIPTIONS_TREE: &str = "subscriptions";
const DEVICE_TREE: &str = "device";
const CLIENT_ID_KEY: &str = "client_id";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub subscribed: bool,
    /// UTC milliseconds of the confirmation that produced this record.
    pub updated_at: i64,
}

#[derive(Clone)]
pub struct SledStore {
    db: Db,
    tree: Tree,
}

impl SledStore {
    /// Open or create a sled database at `path`.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|source| StoreError::Open {
            path: path.to_string(),
            source,
        })?;
        Self::with_db(db)
    }

    /// A database removed when the last handle is dropped.
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::with_db(db)
    }

    fn with_db(db: Db) -> Result<Self, StoreError> {
        let tree = db.open_tree(SUBSCRIPTIONS_TREE)?;
        Ok(Self { db, tree })
    }

    /// Subscriber id this device presents to the broker.
    ///
    /// Generated on first use and persisted, so every later request (and every
    /// later process) names the same subscriber.
    pub fn client_id(&self) -> Result<String, StoreError> {
        let device = self.db.open_tree(DEVICE_TREE)?;
        let fresh = Uuid::new_v4().to_string();

        // compare_and_swap keeps the first id if two callers race
        let swapped =
            device.compare_and_swap(CLIENT_ID_KEY, None as Option<&[u8]>, Some(fresh.as_bytes()))?;
        match swapped {
            Ok(()) => {
                device.flush()?;
                Ok(fresh)
            }
            Err(existing) => match existing.current {
                Some(raw) => Ok(String::from_utf8_lossy(&raw).into_owned()),
                None => Ok(fresh),
            },
        }
    }

    /// Full record for `key`, including when it was last confirmed.
    pub fn record(&self, key: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
        match self.tree.get(key.as_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }
}

impl PreferenceStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.record(key)?.map(|record| record.subscribed))
    }

    fn put(&self, key: &str, value: bool) -> Result<(), StoreError> {
        let record = SubscriptionRecord {
            subscribed: value,
            updated_at: Utc::now().timestamp_millis(),
        };
        let serialized = serde_json::to_vec(&record)?;

        self.tree.insert(key.as_bytes(), serialized)?;
        self.tree.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("db", &"sled::Db")
            .field("recovered", &self.db.was_recovered())
            .field("records", &self.tree.len())
            .finish()
    }
}
