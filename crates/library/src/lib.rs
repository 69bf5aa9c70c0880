#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(
    clippy::needless_raw_string_hashes,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_panics_doc
)]
#![allow(clippy::module_name_repetitions)]

//! Item library for bitcheck
//!
//! This crate owns the record of which files are under management and the
//! checksum stored for each. Verification only sees it through the
//! [`ItemStore`] trait; the `SQLite` store is the persistent implementation
//! and [`MemoryLibrary`] the in-process one.

pub mod import;
pub mod memory;
mod queries;
pub mod selector;
pub mod sqlite;

pub use import::{import, ImportSummary};
pub use memory::MemoryLibrary;
pub use selector::Selector;
pub use sqlite::SqliteLibrary;

use async_trait::async_trait;
use bitcheck_errors::{Error, LibraryError};
use bitcheck_hash::Hash;
use bitcheck_types::Item;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::Duration;

/// Access to managed items
///
/// Implementations may only change the checksum of an existing item through
/// `save_checksum`; path and media type are fixed at registration.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Items matching `selector`, ordered by path
    async fn items(&self, selector: &Selector) -> Result<Vec<Item>, Error>;

    /// Persist a new checksum for `item`
    async fn save_checksum(&self, item: &Item, digest: &Hash) -> Result<(), Error>;

    /// Register a file. Returns `None` if the path is already known.
    async fn register(&self, path: &Path) -> Result<Option<Item>, Error>;
}

/// Text form of `path` as stored in the library; never lossy
pub(crate) fn storable_path(path: &Path) -> Result<&str, LibraryError> {
    path.to_str().ok_or_else(|| LibraryError::UnsupportedPath {
        path: path.display().to_string(),
    })
}

/// Create a new `SQLite` connection pool
///
/// # Errors
///
/// Returns an error if the database connection fails or configuration is invalid.
pub async fn create_pool(db_path: &Path) -> Result<Pool<Sqlite>, Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| {
            Error::from(LibraryError::DatabaseError {
                message: e.to_string(),
            })
        })?;

    if let Ok(mut conn) = pool.acquire().await {
        let _ = sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&mut *conn)
            .await;
        let _ = sqlx::query("PRAGMA temp_store = MEMORY")
            .execute(&mut *conn)
            .await;
    }

    Ok(pool)
}

/// Run database migrations
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        LibraryError::MigrationFailed {
            message: e.to_string(),
        }
        .into()
    })
}
