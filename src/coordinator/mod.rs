//! Topic subscription coordinator
//!
//! Orchestrates subscribe/unsubscribe requests against the broker and keeps
//! the local `SubscriptionStore` in step with what the broker confirmed:
//! - the store is written only after the broker confirms
//! - a broker failure leaves the store untouched and is returned verbatim
//! - `is_subscribed`/`is_initialized` are local reads and never suspend
//!
//! Concurrency notes:
//! - the coordinator holds no task or loop of its own; every call is a single
//!   broker round-trip followed by a single-key write
//! - concurrent calls for the same topic are not serialized: the store ends up
//!   with whichever completion lands last. Callers that need ordering should
//!   serialize per topic.
//! - a request, once issued, runs to completion

use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::broker::{BrokerClient, Channel, Topic};
use crate::persistence::{PreferenceStore, SubscriptionStore};
use crate::utils::error::BrokerError;

/// Outcome of one subscribe/unsubscribe call: the confirmed state, or the
/// broker's error.
pub type OperationResult = Result<bool, BrokerError>;

/// Local view of one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStatus {
    pub topic: Topic,
    pub channel: Channel,
    pub initialized: bool,
    pub subscribed: bool,
}

#[derive(Debug)]
pub struct TopicCoordinator<B, S> {
    broker: B,
    store: SubscriptionStore<S>,
}

impl<B: BrokerClient, S: PreferenceStore> TopicCoordinator<B, S> {
    pub fn new(broker: B, store: SubscriptionStore<S>) -> Self {
        Self { broker, store }
    }

    /// Subscribe to `topic`. Re-subscribing succeeds and re-confirms the record.
    pub async fn subscribe(&self, topic: Topic) -> OperationResult {
        self.apply(topic, true).await
    }

    pub async fn unsubscribe(&self, topic: Topic) -> OperationResult {
        self.apply(topic, false).await
    }

    /// Last confirmed state; `false` when never initialized.
    pub fn is_subscribed(&self, topic: Topic) -> bool {
        self.store.get(topic.storage_key(), false)
    }

    pub fn is_initialized(&self, topic: Topic) -> bool {
        self.store.is_initialized(topic.storage_key())
    }

    /// Subscribe every topic that has never been initialized.
    ///
    /// Topics start subscribed unless the user opts out, so a topic with any
    /// record (including `false`) is left alone. Requests run concurrently;
    /// one outcome is returned per attempted topic.
    pub async fn bootstrap(&self) -> Vec<(Topic, OperationResult)> {
        let pending: Vec<Topic> = Topic::ALL
            .into_iter()
            .filter(|topic| !self.is_initialized(*topic))
            .collect();

        let outcomes = join_all(pending.iter().map(|topic| self.subscribe(*topic))).await;
        pending.into_iter().zip(outcomes).collect()
    }

    pub fn status(&self) -> Vec<TopicStatus> {
        Topic::ALL
            .into_iter()
            .map(|topic| TopicStatus {
                topic,
                channel: topic.channel(),
                initialized: self.is_initialized(topic),
                subscribed: self.is_subscribed(topic),
            })
            .collect()
    }

    async fn apply(&self, topic: Topic, subscribed: bool) -> OperationResult {
        let outcome = if subscribed {
            self.broker.subscribe_to_topic(topic.name()).await
        } else {
            self.broker.unsubscribe_from_topic(topic.name()).await
        };

        if let Err(e) = outcome {
            warn!(%topic, subscribed, error = %e, "broker did not confirm subscription change");
            return Err(e);
        }

        // The broker is authoritative: a failed write leaves the local cache
        // stale but does not turn a confirmed change into a failure.
        if let Err(e) = self.store.put(topic.storage_key(), subscribed) {
            error!(
                %topic,
                subscribed,
                error = %e,
                "broker confirmed change but local record was not written; local state is stale"
            );
        }

        info!(%topic, subscribed, "subscription change confirmed");
        Ok(subscribed)
    }
}
