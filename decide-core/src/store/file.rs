//! File-backed store: one `<key>.json` file per key under a data directory.

use futures::future::BoxFuture;
use std::io;
use std::path::PathBuf;
use tokio::fs;

use super::{validate_key, KeyValueStore, StoreError};

/// A [`KeyValueStore`] persisting each key as a JSON file on disk.
///
/// The data directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move {
            validate_key(key)?;
            let path = self.path(key);

            match fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StoreError::Io(path, e)),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            validate_key(key)?;

            fs::create_dir_all(&self.data_dir)
                .await
                .map_err(|e| StoreError::Io(self.data_dir.clone(), e))?;

            let path = self.path(key);
            fs::write(&path, value)
                .await
                .map_err(|e| StoreError::Io(path, e))
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            validate_key(key)?;
            let path = self.path(key);

            match fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::Io(path, e)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_path_layout() {
        let (store, _temp) = test_store();
        let path = store.path("saved_decisions");
        assert!(path.ends_with("saved_decisions.json"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _temp) = test_store();
        assert!(store.get("saved_calculations").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(nested.clone());

        store.set("saved_comparisons", "[]").await.unwrap();

        assert!(nested.exists());
        assert_eq!(
            store.get("saved_comparisons").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _temp) = test_store();
        store.set("key", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            store.get("key").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let (store, _temp) = test_store();
        store.remove("never_written").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let (store, _temp) = test_store();
        let err = store.get("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
        assert!(store.set(".hidden", "x").await.is_err());
    }
}
