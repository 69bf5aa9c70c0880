//! `SQLite`-backed item store

use crate::{queries, ItemStore, Selector};
use async_trait::async_trait;
use bitcheck_errors::{Error, LibraryError};
use bitcheck_hash::Hash;
use bitcheck_types::{Item, MediaType};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};

/// Persistent library stored in a single database file
#[derive(Clone)]
pub struct SqliteLibrary {
    pool: Pool<Sqlite>,
    db_path: PathBuf,
}

impl SqliteLibrary {
    /// Open (creating if needed) the library at `db_path` and apply migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// database cannot be opened, or a migration fails.
    pub async fn open(db_path: &Path) -> Result<Self, Error> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io_with_path(&e, parent))?;
        }

        let pool = crate::create_pool(db_path).await?;
        crate::run_migrations(&pool).await?;
        tracing::debug!(path = %db_path.display(), "opened library");

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    /// Wrap an existing, already migrated pool
    #[must_use]
    pub fn with_pool(pool: Pool<Sqlite>, db_path: PathBuf) -> Self {
        Self { pool, db_path }
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl ItemStore for SqliteLibrary {
    async fn items(&self, selector: &Selector) -> Result<Vec<Item>, Error> {
        let mut tx = self.pool.begin().await?;
        let items = queries::list_items(&mut tx, selector.media_type()).await?;
        tx.commit().await?;
        Ok(items.into_iter().filter(|i| selector.matches(i)).collect())
    }

    async fn save_checksum(&self, item: &Item, digest: &Hash) -> Result<(), Error> {
        let mut tx = self.pool.begin().await?;
        let changed = queries::set_checksum(&mut tx, item.id, &digest.to_hex()).await?;
        if changed == 0 {
            return Err(LibraryError::ItemNotFound { id: item.id }.into());
        }
        tx.commit().await?;
        Ok(())
    }

    async fn register(&self, path: &Path) -> Result<Option<Item>, Error> {
        let mut tx = self.pool.begin().await?;
        let item = queries::insert_item(&mut tx, path, MediaType::from_path(path)).await?;
        tx.commit().await?;
        Ok(item)
    }
}
