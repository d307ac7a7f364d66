//! Saved-item persistence over a key-value store.
//!
//! Each [`Category`] owns one storage key holding a JSON array of
//! [`SavedItem`] records, newest first. Every mutation is a full
//! read-modify-write of that array, serialized through a per-category async
//! mutex so overlapping calls cannot clobber each other's writes.

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{Category, SavedData, SavedItem};
use crate::store::{KeyValueStore, StoreError};

/// Errors that can occur while saving or deleting items.
///
/// Read-side failures never surface here: an absent or unreadable collection
/// is treated as empty so a corrupt blob cannot take down a list view.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One mutex per category, so writes to different collections never contend.
#[derive(Debug, Default)]
struct CategoryLocks {
    calculation: Mutex<()>,
    comparison: Mutex<()>,
    decision: Mutex<()>,
}

impl CategoryLocks {
    fn get(&self, category: Category) -> &Mutex<()> {
        match category {
            Category::Calculation => &self.calculation,
            Category::Comparison => &self.comparison,
            Category::Decision => &self.decision,
        }
    }
}

/// CRUD over per-category collections of saved items.
pub struct SavedItemRepository<S: KeyValueStore> {
    store: S,
    locks: CategoryLocks,
}

impl<S: KeyValueStore> SavedItemRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: CategoryLocks::default(),
        }
    }

    /// Returns the category's items, newest first.
    ///
    /// An absent key, a read failure, or an unparseable blob all come back as
    /// an empty list; the failure is logged and never propagated.
    pub async fn list(&self, category: Category) -> Vec<SavedItem> {
        self.load(category).await
    }

    /// Saves a snapshot into a category.
    ///
    /// An auto-save updates the category's single auto-saved record in place
    /// (same id, created_at, and name); the first auto-save creates it. An
    /// explicit save always creates a new record, disambiguating name
    /// collisions with a `" (N)"` suffix. New records are prepended.
    pub async fn save(
        &self,
        category: Category,
        name: &str,
        data: SavedData,
        auto_saved: bool,
    ) -> Result<SavedItem, RepositoryError> {
        let _guard = self.locks.get(category).lock().await;
        let mut items = self.load(category).await;

        let item = if auto_saved {
            match items.iter_mut().find(|i| i.auto_saved) {
                Some(existing) => {
                    existing.data = data;
                    existing.updated_at = Utc::now();
                    existing.clone()
                }
                None => {
                    let item = SavedItem::new(name, data, true);
                    items.insert(0, item.clone());
                    item
                }
            }
        } else {
            let unique = disambiguate_name(&items, name);
            let item = SavedItem::new(unique, data, false);
            items.insert(0, item.clone());
            item
        };

        self.persist(category, &items).await?;
        Ok(item)
    }

    /// Removes the record with the given id. Unknown ids are a no-op.
    pub async fn delete(
        &self,
        category: Category,
        id: uuid::Uuid,
    ) -> Result<(), RepositoryError> {
        let _guard = self.locks.get(category).lock().await;
        let mut items = self.load(category).await;

        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Ok(());
        }

        self.persist(category, &items).await
    }

    /// Empties a category, or with a `kind` filter removes only the records
    /// whose payload discriminator matches (for categories whose storage key
    /// is shared by several calculators).
    pub async fn clear(
        &self,
        category: Category,
        kind: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let _guard = self.locks.get(category).lock().await;

        match kind {
            None => self.persist(category, &[]).await,
            Some(kind) => {
                let mut items = self.load(category).await;
                items.retain(|i| i.data.kind() != kind);
                self.persist(category, &items).await
            }
        }
    }

    async fn load(&self, category: Category) -> Vec<SavedItem> {
        match self.store.get(category.storage_key()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable {} collection: {}", category, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {} collection: {}", category, e);
                Vec::new()
            }
        }
    }

    async fn persist(
        &self,
        category: Category,
        items: &[SavedItem],
    ) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(items)?;
        self.store.set(category.storage_key(), &json).await?;
        Ok(())
    }
}

/// Finds a name not yet taken (case-insensitively) in the collection,
/// suffixing `" (N)"` with the first free counter.
fn disambiguate_name(items: &[SavedItem], name: &str) -> String {
    let taken =
        |candidate: &str| items.iter().any(|i| i.name.eq_ignore_ascii_case(candidate));

    if !taken(name) {
        return name.to_string();
    }

    let mut n = 1;
    loop {
        let candidate = format!("{} ({})", name, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
