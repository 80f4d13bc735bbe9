use std::time::Duration;

use tempfile::tempdir;
use tungstenite::protocol::Message as WsMessage;

use crate::broker::{InMemoryBroker, Topic};
use crate::coordinator::TopicCoordinator;
use crate::persistence::{SledStore, SubscriptionStore};
use crate::transport::WsBrokerClient;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::transport::tests::{Registry, confirm, confirm_into, spawn_broker};
use crate::utils::error::BrokerError;

#[tokio::test]
async fn integration_subscribe_over_websocket_into_sled() {
    let addr = spawn_broker(confirm).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("db");

    let sled = SledStore::open(path.to_str().unwrap()).unwrap();
    let broker = WsBrokerClient::new(
        format!("ws://{addr}"),
        sled.client_id().unwrap(),
        Duration::from_secs(2),
    );
    let coordinator = TopicCoordinator::new(broker, SubscriptionStore::new(sled));

    assert!(!coordinator.is_initialized(Topic::TopicOne));
    assert_eq!(coordinator.subscribe(Topic::TopicOne).await, Ok(true));
    assert!(coordinator.is_subscribed(Topic::TopicOne));
    assert!(coordinator.is_initialized(Topic::TopicOne));
}

#[tokio::test]
async fn integration_rejected_unsubscribe_keeps_record() {
    let addr = spawn_broker(|request| match request {
        ClientMessage::Subscribe { .. } => confirm(request),
        ClientMessage::Unsubscribe { request_id, .. } => {
            let reply = ServerMessage::Error {
                message: "network unreachable".into(),
                request_id: Some(request_id),
            };
            vec![WsMessage::text(serde_json::to_string(&reply).unwrap())]
        }
    })
    .await;

    let broker = WsBrokerClient::new(format!("ws://{addr}"), "device-1", Duration::from_secs(2));
    let store = SubscriptionStore::new(SledStore::temporary().unwrap());
    let coordinator = TopicCoordinator::new(broker, store);

    coordinator.subscribe(Topic::TopicOne).await.unwrap();
    assert_eq!(
        coordinator.unsubscribe(Topic::TopicOne).await,
        Err(BrokerError::Rejected("network unreachable".into()))
    );
    assert!(coordinator.is_subscribed(Topic::TopicOne));
}

#[tokio::test]
async fn integration_state_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db");
    let path = path.to_str().unwrap();
    let broker = InMemoryBroker::new();

    {
        let store = SubscriptionStore::new(SledStore::open(path).unwrap());
        let coordinator = TopicCoordinator::new(broker.clone(), store);
        assert_eq!(
            coordinator.bootstrap().await,
            vec![(Topic::TopicOne, Ok(true))]
        );
        coordinator.unsubscribe(Topic::TopicOne).await.unwrap();
    }

    let store = SubscriptionStore::new(SledStore::open(path).unwrap());
    let coordinator = TopicCoordinator::new(broker.clone(), store);

    assert!(coordinator.is_initialized(Topic::TopicOne));
    assert!(!coordinator.is_subscribed(Topic::TopicOne));
    // the opt-out is remembered, so startup does not resubscribe
    assert!(coordinator.bootstrap().await.is_empty());
    assert_eq!(broker.requests(), 2);
}

#[tokio::test]
async fn integration_confirmed_subscribe_is_held_by_broker() {
    let registry = Registry::default();
    let addr = spawn_broker(confirm_into(registry.clone())).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("db");
    let path = path.to_str().unwrap();

    let client_id = {
        let sled = SledStore::open(path).unwrap();
        let client_id = sled.client_id().unwrap();
        let broker = WsBrokerClient::new(
            format!("ws://{addr}"),
            client_id.clone(),
            Duration::from_secs(2),
        );
        let coordinator = TopicCoordinator::new(broker, SubscriptionStore::new(sled));

        assert_eq!(coordinator.subscribe(Topic::TopicOne).await, Ok(true));
        assert!(coordinator.is_subscribed(Topic::TopicOne));
        client_id
    };

    // local record and broker agree once the request's connection is gone
    assert!(registry.lock().unwrap()[&client_id].contains("TOPIC_ONE"));

    // after a restart the device presents the same id and can undo it
    let sled = SledStore::open(path).unwrap();
    assert_eq!(sled.client_id().unwrap(), client_id);
    let broker = WsBrokerClient::new(
        format!("ws://{addr}"),
        sled.client_id().unwrap(),
        Duration::from_secs(2),
    );
    let coordinator = TopicCoordinator::new(broker, SubscriptionStore::new(sled));

    assert_eq!(coordinator.unsubscribe(Topic::TopicOne).await, Ok(false));
    assert!(registry.lock().unwrap()[&client_id].is_empty());
    assert!(!coordinator.is_subscribed(Topic::TopicOne));
}
