use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// KeyValueStore port for options and transients
///
/// Options are written without a TTL and persist until deleted. Transients
/// carry a TTL and read as absent once expired. Writing a key replaces its
/// previous value atomically: readers see either the old or the new value.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, returning `None` when absent or expired
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Writes a value, optionally expiring after `ttl`
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()>;

    /// Removes a value; deleting a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Reads and deserializes a stored value
///
/// A value that no longer matches the expected shape reads as absent.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(value) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding stored value with unexpected shape");
            Ok(None)
        }
    }
}

/// Serializes and stores a value
pub fn save_json<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<()> {
    store.set(key, serde_json::to_value(value)?, ttl)
}
