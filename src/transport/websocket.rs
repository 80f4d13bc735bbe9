//! WebSocket transport
//!
//! `WsBrokerClient` talks to the broker over the JSON protocol in
//! [`message`](super::message). Every request:
//! - opens its own connection
//! - sends one `subscribe`/`unsubscribe` frame naming this client and tagged
//!   with a fresh request id
//! - waits for the `subscribed`/`unsubscribed` frame carrying that id, or an
//!   `error` frame
//!
//! Subscriptions belong to the client id, not to the connection, so closing
//! the socket after the confirmation does not undo them.
//!
//! Deliveries (`message` frames) and answers to other requests are skipped.
//! Connect, send and the wait for the answer share the configured timeout;
//! closing the socket afterwards is outside it. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use super::message::{ClientMessage, ServerMessage};
use crate::broker::BrokerClient;
use crate::config::BrokerSettings;
use crate::utils::error::BrokerError;

type BrokerStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on the closing handshake once the answer is in.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct WsBrokerClient {
    url: String,
    client_id: String,
    timeout: Duration,
}

impl WsBrokerClient {
    pub fn new(url: impl Into<String>, client_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client_id: client_id.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &BrokerSettings, client_id: impl Into<String>) -> Self {
        Self::new(
            settings.url.clone(),
            client_id,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    async fn request(&self, msg: ClientMessage) -> Result<(), BrokerError> {
        let deadline = Instant::now() + self.timeout;

        let mut ws_stream = match timeout_at(deadline, self.connect()).await {
            Ok(connected) => connected?,
            Err(_) => return Err(BrokerError::Timeout(self.timeout)),
        };

        let outcome = match timeout_at(deadline, exchange(&mut ws_stream, &msg)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(BrokerError::Timeout(self.timeout)),
        };

        if timeout(CLOSE_GRACE, ws_stream.close(None)).await.is_err() {
            debug!(url = %self.url, "broker did not finish closing handshake");
        }
        outcome
    }

    async fn connect(&self) -> Result<BrokerStream, BrokerError> {
        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| BrokerError::Transport(e.to_string()))?;
        Ok(ws_stream)
    }
}

async fn exchange(ws_stream: &mut BrokerStream, msg: &ClientMessage) -> Result<(), BrokerError> {
    let text = serde_json::to_string(msg).map_err(|e| BrokerError::Transport(e.to_string()))?;
    debug!(frame = %text, "sending broker request");
    ws_stream
        .send(WsMessage::text(text))
        .await
        .map_err(|e| BrokerError::Transport(e.to_string()))?;

    loop {
        let frame = match ws_stream.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => return Err(BrokerError::Transport(e.to_string())),
            None => return Err(closed_before_confirmation()),
        };

        if frame.is_close() {
            return Err(closed_before_confirmation());
        }
        if !frame.is_text() {
            continue;
        }

        let text = frame
            .to_text()
            .map_err(|e| BrokerError::Transport(e.to_string()))?;
        let reply = match serde_json::from_str::<ServerMessage>(text) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "ignoring unparseable broker frame");
                continue;
            }
        };

        if let Some(outcome) = match_reply(msg, reply) {
            return outcome;
        }
    }
}

fn closed_before_confirmation() -> BrokerError {
    BrokerError::Transport("connection closed before confirmation".to_string())
}

/// Decides whether `reply` answers `request`. `None` means keep waiting.
pub(crate) fn match_reply(
    request: &ClientMessage,
    reply: ServerMessage,
) -> Option<Result<(), BrokerError>> {
    let id = request.request_id();
    match (request, reply) {
        (
            ClientMessage::Subscribe { .. },
            ServerMessage::Subscribed {
                request_id: Some(reply_id),
                ..
            },
        )
        | (
            ClientMessage::Unsubscribe { .. },
            ServerMessage::Unsubscribed {
                request_id: Some(reply_id),
                ..
            },
        ) if reply_id == id => Some(Ok(())),
        (_, ServerMessage::Error { message, request_id }) => match request_id {
            Some(reply_id) if reply_id != id => None,
            _ => Some(Err(BrokerError::Rejected(message))),
        },
        _ => None,
    }
}

#[async_trait]
impl BrokerClient for WsBrokerClient {
    async fn subscribe_to_topic(&self, name: &str) -> Result<(), BrokerError> {
        self.request(ClientMessage::Subscribe {
            client_id: self.client_id.clone(),
            topic: name.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
        .await
    }

    async fn unsubscribe_from_topic(&self, name: &str) -> Result<(), BrokerError> {
        self.request(ClientMessage::Unsubscribe {
            client_id: self.client_id.clone(),
            topic: name.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
        .await
    }
}
