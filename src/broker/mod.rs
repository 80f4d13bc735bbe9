//! The `broker` module describes the remote side of a subscription: the fixed
//! set of topics and their notification channels, and the `BrokerClient`
//! contract the coordinator calls into.

pub mod channel;
pub mod client;
pub mod memory;
pub mod topic;

pub use channel::Channel;
pub use client::BrokerClient;
pub use memory::InMemoryBroker;
pub use topic::Topic;
