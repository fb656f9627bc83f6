use crate::ports::outbound::KeyValueStore;
use crate::shared::error::CompatError;
use crate::shared::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// MemoryStore adapter keeping options and transients for one process
///
/// Used by `--no-persist` runs and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (Value, Option<Instant>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Value, Option<Instant>)>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            None => return Ok(None),
            Some((_, Some(expires_at))) => Instant::now() >= *expires_at,
            Some((_, None)) => false,
        };
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let expires_at = match ttl {
            Some(ttl) => Some(Instant::now().checked_add(ttl).ok_or_else(|| {
                CompatError::Validation {
                    message: format!("TTL of {}s for '{}' is out of range", ttl.as_secs(), key),
                }
            })?),
            None => None,
        };
        self.lock().insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", json!({"a": 1}), None).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 1})));

        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.delete("k").unwrap();
    }

    #[test]
    fn test_ttl_expiry() {
        let store = MemoryStore::new();
        store
            .set("short", json!(1), Some(Duration::from_millis(1)))
            .unwrap();
        store
            .set("long", json!(2), Some(Duration::from_secs(3600)))
            .unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(store.get("short").unwrap(), None);
        assert_eq!(store.get("long").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_out_of_range_ttl_is_rejected() {
        let store = MemoryStore::new();
        let err = store.set("k", json!(1), Some(Duration::MAX)).unwrap_err();

        assert!(err.to_string().contains("out of range"));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
