use async_trait::async_trait;

use crate::utils::error::BrokerError;

/// Remote pub/sub broker, as seen by the coordinator.
///
/// Both calls complete exactly once, with confirmation or an error. Repeating
/// a request for the state the broker already has must succeed.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    async fn subscribe_to_topic(&self, name: &str) -> Result<(), BrokerError>;

    async fn unsubscribe_from_topic(&self, name: &str) -> Result<(), BrokerError>;
}

#[async_trait]
impl<T: BrokerClient + ?Sized> BrokerClient for std::sync::Arc<T> {
    async fn subscribe_to_topic(&self, name: &str) -> Result<(), BrokerError> {
        (**self).subscribe_to_topic(name).await
    }

    async fn unsubscribe_from_topic(&self, name: &str) -> Result<(), BrokerError> {
        (**self).unsubscribe_from_topic(name).await
    }
}
