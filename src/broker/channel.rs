use serde::Serialize;

use super::topic::Topic;

/// Local notification channel a topic's messages are delivered through.
///
/// Creating the channel on the device is the platform's job; this is the
/// static metadata it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    NewMessage,
}

impl Channel {
    pub const ALL: [Channel; 1] = [Channel::NewMessage];

    pub fn id(self) -> &'static str {
        match self {
            Channel::NewMessage => "new_message",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Channel::NewMessage => "New message alerts",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Channel::NewMessage => "Choose whether to receive alerts for new messages",
        }
    }

    /// Topics delivered through this channel.
    pub fn topics(self) -> impl Iterator<Item = Topic> {
        Topic::ALL.into_iter().filter(move |t| t.channel() == self)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.id())
    }
}
