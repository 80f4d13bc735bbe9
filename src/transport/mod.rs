//! The `transport` module connects the coordinator to a real broker over
//! WebSockets.

pub mod message;
pub mod websocket;

pub use websocket::WsBrokerClient;
