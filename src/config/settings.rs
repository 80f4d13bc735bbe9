use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the local store, the remote broker and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub broker: BrokerSettings,
    pub log: LogSettings,
}

/// Where the subscription records are persisted.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
}

/// Configuration settings for the remote broker.
///
/// `request_timeout_secs` bounds how long a single subscribe or unsubscribe
/// waits for confirmation. `client_id` pins the subscriber id sent to the
/// broker; when unset, an id generated once and kept in the store is used.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub url: String,
    pub request_timeout_secs: u64,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub store: Option<PartialStoreSettings>,
    pub broker: Option<PartialBrokerSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                path: "topicsub_db".to_string(),
            },
            broker: BrokerSettings {
                url: "ws://127.0.0.1:8080".to_string(),
                request_timeout_secs: 10,
                client_id: None,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl PartialSettings {
    /// Fill every missing value from `defaults`.
    pub fn merge_onto(self, defaults: Settings) -> Settings {
        let store = self.store;
        let broker = self.broker;
        let log = self.log;

        Settings {
            store: StoreSettings {
                path: store
                    .and_then(|s| s.path)
                    .unwrap_or(defaults.store.path),
            },
            broker: BrokerSettings {
                url: broker
                    .as_ref()
                    .and_then(|b| b.url.clone())
                    .unwrap_or(defaults.broker.url),
                request_timeout_secs: broker
                    .as_ref()
                    .and_then(|b| b.request_timeout_secs)
                    .unwrap_or(defaults.broker.request_timeout_secs),
                client_id: broker
                    .and_then(|b| b.client_id)
                    .or(defaults.broker.client_id),
            },
            log: LogSettings {
                level: log
                    .and_then(|l| l.level)
                    .unwrap_or(defaults.log.level),
            },
        }
    }
}
