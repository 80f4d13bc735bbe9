//! The `error` module defines the error types used across `topicsub`.
//!
//! Each layer owns its error: the broker transport reports `BrokerError`,
//! the persistence layer reports `StoreError`, and the binary folds both
//! (plus configuration failures) into `Error`.

use std::time::Duration;

use thiserror::Error;

/// Failure of a subscribe or unsubscribe request against the remote broker.
///
/// `Rejected` and `Transport` display their detail string verbatim so callers
/// can surface it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    /// The broker answered, but refused the request.
    #[error("{0}")]
    Rejected(String),
    /// The request never got an answer: connect failure, socket error, or
    /// a connection closed before confirmation.
    #[error("{0}")]
    Transport(String),
    #[error("no confirmation from broker within {0:?}")]
    Timeout(Duration),
}

impl BrokerError {
    /// Human-readable detail for presentation.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Failure of the durable preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store at '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: sled::Error,
    },
    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),
    #[error("failed to encode subscription record: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Application-level error used by the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Broker(#[from] BrokerError),
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),
}
