use serde::{Deserialize, Serialize};

/// Frames sent to the broker.
///
/// `client_id` names the subscriber. The broker keys subscriptions by it, so
/// they outlive the connection that created them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe {
        client_id: String,
        topic: String,
        request_id: String,
    },
    #[serde(rename = "unsubscribe")]
    Unsubscribe {
        client_id: String,
        topic: String,
        request_id: String,
    },
}

impl ClientMessage {
    pub fn client_id(&self) -> &str {
        match self {
            ClientMessage::Subscribe { client_id, .. }
            | ClientMessage::Unsubscribe { client_id, .. } => client_id,
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            ClientMessage::Subscribe { request_id, .. }
            | ClientMessage::Unsubscribe { request_id, .. } => request_id,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            ClientMessage::Subscribe { topic, .. } | ClientMessage::Unsubscribe { topic, .. } => {
                topic
            }
        }
    }
}

/// Frames received from the broker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "subscribed")]
    Subscribed {
        topic: String,
        request_id: Option<String>,
    },
    #[serde(rename = "unsubscribed")]
    Unsubscribed {
        topic: String,
        request_id: Option<String>,
    },
    #[serde(rename = "error")]
    Error {
        message: String,
        request_id: Option<String>,
    },
    /// A delivery on some topic; not an answer to any request.
    #[serde(rename = "message")]
    Message { topic: String, payload: String },
}
