//! In-process item store

use crate::{ItemStore, Selector};
use async_trait::async_trait;
use bitcheck_errors::{Error, LibraryError};
use bitcheck_hash::Hash;
use bitcheck_types::{Item, ItemId};
use std::path::Path;
use tokio::sync::RwLock;

/// Item store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    items: RwLock<Vec<Item>>,
}

impl MemoryLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing items (ids are kept as given)
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Stored checksum of `id`, if the item exists and has one
    pub async fn checksum(&self, id: ItemId) -> Option<String> {
        self.items
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .and_then(|i| i.checksum.clone())
    }

    /// Snapshot of every item, in insertion order
    pub async fn snapshot(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl ItemStore for MemoryLibrary {
    async fn items(&self, selector: &Selector) -> Result<Vec<Item>, Error> {
        let mut items: Vec<Item> = self
            .items
            .read()
            .await
            .iter()
            .filter(|i| selector.matches(i))
            .cloned()
            .collect();
        // Raw byte order, matching `ORDER BY path` in the SQLite store
        items.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        Ok(items)
    }

    async fn save_checksum(&self, item: &Item, digest: &Hash) -> Result<(), Error> {
        let mut items = self.items.write().await;
        let stored = items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(LibraryError::ItemNotFound { id: item.id })?;
        stored.checksum = Some(digest.to_hex());
        Ok(())
    }

    async fn register(&self, path: &Path) -> Result<Option<Item>, Error> {
        crate::storable_path(path)?;
        let mut items = self.items.write().await;
        if items.iter().any(|i| i.path == path) {
            return Ok(None);
        }
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let item = Item::new(id, path);
        items.push(item.clone());
        Ok(Some(item))
    }
}
