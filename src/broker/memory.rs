//! In-process broker double.
//!
//! Keeps the set of subscribed topic names and lets a caller force the next
//! subscribe or unsubscribe requests to fail with a given detail. Clones share
//! state, so a test can hand one clone to the coordinator and keep another to
//! inspect or reconfigure it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::client::BrokerClient;
use crate::utils::error::BrokerError;

#[derive(Debug, Default)]
struct State {
    subscribed: HashSet<String>,
    subscribe_failure: Option<BrokerError>,
    unsubscribe_failure: Option<BrokerError>,
    requests: usize,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryBroker {
    state: Arc<Mutex<State>>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subscribe request with `error` until [`recover`](Self::recover).
    pub fn fail_subscribe(&self, error: BrokerError) {
        self.lock().subscribe_failure = Some(error);
    }

    /// Fail every unsubscribe request with `error` until [`recover`](Self::recover).
    pub fn fail_unsubscribe(&self, error: BrokerError) {
        self.lock().unsubscribe_failure = Some(error);
    }

    pub fn recover(&self) {
        let mut state = self.lock();
        state.subscribe_failure = None;
        state.unsubscribe_failure = None;
    }

    /// Broker-side truth for `name`.
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.lock().subscribed.contains(name)
    }

    /// Number of requests received, failed ones included.
    pub fn requests(&self) -> usize {
        self.lock().requests
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BrokerClient for InMemoryBroker {
    async fn subscribe_to_topic(&self, name: &str) -> Result<(), BrokerError> {
        let mut state = self.lock();
        state.requests += 1;
        if let Some(err) = state.subscribe_failure.clone() {
            return Err(err);
        }
        state.subscribed.insert(name.to_string());
        debug!(topic = name, "in-memory broker subscribed");
        Ok(())
    }

    async fn unsubscribe_from_topic(&self, name: &str) -> Result<(), BrokerError> {
        let mut state = self.lock();
        state.requests += 1;
        if let Some(err) = state.unsubscribe_failure.clone() {
            return Err(err);
        }
        state.subscribed.remove(name);
        debug!(topic = name, "in-memory broker unsubscribed");
        Ok(())
    }
}
