#[cfg(test)]
mod persistence_tests {
    use crate::persistence::sled_store::SubscriptionRecord;
    use crate::persistence::{MemoryStore, PreferenceStore, SledStore, SubscriptionStore};

    use tempfile::tempdir;

    #[test]
    fn test_sled_put_and_get() {
        let store = SledStore::temporary().unwrap();

        assert_eq!(store.get("subscribe_topic_one").unwrap(), None);
        store.put("subscribe_topic_one", true).unwrap();
        assert_eq!(store.get("subscribe_topic_one").unwrap(), Some(true));
        store.put("subscribe_topic_one", false).unwrap();
        assert_eq!(store.get("subscribe_topic_one").unwrap(), Some(false));
    }

    #[test]
    fn test_sled_keys_are_independent() {
        let store = SledStore::temporary().unwrap();

        store.put("a", true).unwrap();
        store.put("b", false).unwrap();

        assert_eq!(store.get("a").unwrap(), Some(true));
        assert_eq!(store.get("b").unwrap(), Some(false));
        assert_eq!(store.get("c").unwrap(), None);
    }

    #[test]
    fn test_sled_record_carries_timestamp() {
        let store = SledStore::temporary().unwrap();
        let before = chrono::Utc::now().timestamp_millis();

        store.put("subscribe_topic_one", true).unwrap();

        let record = store.record("subscribe_topic_one").unwrap().unwrap();
        assert!(record.subscribed);
        assert!(record.updated_at >= before);
    }

    #[test]
    fn test_sled_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db");
        let path = path.to_str().unwrap();

        {
            let store = SledStore::open(path).unwrap();
            store.put("subscribe_topic_one", false).unwrap();
        }

        let reopened = SledStore::open(path).unwrap();
        assert_eq!(reopened.get("subscribe_topic_one").unwrap(), Some(false));
    }

    #[test]
    fn test_client_id_is_generated_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db");
        let path = path.to_str().unwrap();

        let first = {
            let store = SledStore::open(path).unwrap();
            let id = store.client_id().unwrap();
            assert_eq!(store.client_id().unwrap(), id);
            id
        };
        assert!(!first.is_empty());

        let reopened = SledStore::open(path).unwrap();
        assert_eq!(reopened.client_id().unwrap(), first);
        // not mistaken for a subscription record
        assert_eq!(reopened.get("client_id").unwrap(), None);
    }

    #[test]
    fn test_client_id_differs_per_database() {
        let a = SledStore::temporary().unwrap();
        let b = SledStore::temporary().unwrap();
        assert_ne!(a.client_id().unwrap(), b.client_id().unwrap());
    }

    #[test]
    fn test_sled_rejects_corrupt_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db");
        let path = path.to_str().unwrap();

        {
            let db = sled::open(path).unwrap();
            let tree = db.open_tree("subscriptions").unwrap();
            tree.insert("broken", "not json").unwrap();
            tree.flush().unwrap();
        }

        let store = SledStore::open(path).unwrap();
        assert!(store.get("broken").is_err());

        // the typed view hides the error and reports "never written"
        let subscriptions = SubscriptionStore::new(store);
        assert!(!subscriptions.is_initialized("broken"));
        assert!(subscriptions.get("broken", true));
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = SubscriptionRecord {
            subscribed: true,
            updated_at: 1725000000000,
        };

        let data = serde_json::to_vec(&record).unwrap();
        let parsed: SubscriptionRecord = serde_json::from_slice(&data).unwrap();

        assert_eq!(record, parsed);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.put("k", true).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(true));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_uninitialized_is_distinct_from_false() {
        let store = SubscriptionStore::new(MemoryStore::new());

        assert!(!store.is_initialized("subscribe_topic_one"));
        assert!(store.get("subscribe_topic_one", true));
        assert!(!store.get("subscribe_topic_one", false));

        store.put("subscribe_topic_one", false).unwrap();

        assert!(store.is_initialized("subscribe_topic_one"));
        assert!(!store.get("subscribe_topic_one", true));
    }

    #[test]
    fn test_open_fails_on_file_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain_file");
        std::fs::write(&file, b"x").unwrap();

        let err = SledStore::open(file.join("db").to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("failed to open store"));
    }
}
