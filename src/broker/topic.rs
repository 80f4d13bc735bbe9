use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::channel::Channel;
use crate::utils::error::Error;

/// A subscribable broker topic.
///
/// The set is fixed at build time. Each variant carries the broker-side name
/// (sent verbatim), the key its state is persisted under, and the channel its
/// messages are delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    TopicOne,
}

impl Topic {
    pub const ALL: [Topic; 1] = [Topic::TopicOne];

    pub fn name(self) -> &'static str {
        match self {
            Topic::TopicOne => "TOPIC_ONE",
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Topic::TopicOne => "subscribe_topic_one",
        }
    }

    pub fn channel(self) -> Channel {
        match self {
            Topic::TopicOne => Channel::NewMessage,
        }
    }

    pub fn from_name(name: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Resolves the topic of an inbound push message from its sender field.
    ///
    /// Topic messages arrive from `/topics/<NAME>`; the last path segment is
    /// the topic name. Direct messages and unknown topics yield `None`.
    pub fn from_message_source(from: &str) -> Option<Topic> {
        from.rsplit('/').next().and_then(Topic::from_name)
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::from_name(s).ok_or_else(|| Error::UnknownTopic(s.to_string()))
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}
