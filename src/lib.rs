//! # topicsub
//!
//! `topicsub` tracks which push topics a device is subscribed to. It asks a
//! remote pub/sub broker to subscribe or unsubscribe, and keeps the last
//! confirmed answer in a durable local store, so the state can be shown
//! without contacting the broker.
//!
//! ## Core Modules
//!
//! - `broker`: the fixed set of topics and notification channels, and the `BrokerClient` contract.
//! - `coordinator`: `TopicCoordinator`, which confirms changes with the broker before recording them.
//! - `config`: loads settings from defaults, an optional file and the environment.
//! - `persistence`: the durable subscription store (backed by `sled`).
//! - `transport`: a WebSocket `BrokerClient`.
//! - `utils`: error types and logging setup.

pub mod broker;
pub mod config;
pub mod coordinator;
pub mod persistence;
pub mod transport;
pub mod utils;

pub use broker::{BrokerClient, Channel, Topic};
pub use coordinator::{OperationResult, TopicCoordinator, TopicStatus};
pub use persistence::{PreferenceStore, SledStore, SubscriptionStore};
pub use utils::error::{BrokerError, Error, StoreError};

#[cfg(test)]
mod tests;
