//! Key-value storage abstraction.
//!
//! Every persisted value is a JSON-encoded string under a string key. The
//! store offers no transactions and no locking; callers layer their own
//! serialization on top (see [`crate::repository`]).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use futures::future::BoxFuture;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Asynchronous string-keyed store of JSON strings.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for a key. Returns `Ok(None)` if the key is absent.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>>;

    /// Writes the value for a key, overwriting any previous value.
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Removes several keys, stopping at the first failure.
    fn remove_many<'a>(&'a self, keys: &'a [String]) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            for key in keys {
                self.remove(key).await?;
            }
            Ok(())
        })
    }
}

/// Validates a storage key to keep file-backed stores inside their data
/// directory.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.starts_with('.')
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_plain_names() {
        assert!(validate_key("saved_calculations").is_ok());
        assert!(validate_key("theme").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key(".hidden").is_err());
    }

    #[tokio::test]
    async fn test_remove_many_default_impl() {
        let store = MemoryStore::new();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.set("c", "3").await.unwrap();

        store
            .remove_many(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert!(store.get("a").await.unwrap().is_none());
        assert!(store.get("b").await.unwrap().is_none());
        assert_eq!(store.get("c").await.unwrap().as_deref(), Some("3"));
    }
}
