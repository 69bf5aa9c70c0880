//! Runtime SQL queries for the items table

use bitcheck_errors::Error;
use bitcheck_types::{Item, MediaType};
use sqlx::sqlite::SqliteRow;
use sqlx::{query, Row, Sqlite, Transaction};
use std::path::{Path, PathBuf};

fn item_from_row(row: &SqliteRow) -> Item {
    let media: String = row.get("media_type");
    let path: String = row.get("path");
    Item {
        id: row.get("id"),
        path: PathBuf::from(path),
        media_type: MediaType::parse(&media).unwrap_or(MediaType::Unknown),
        checksum: row.get("checksum"),
    }
}

/// All items, optionally restricted to one media type, ordered by path
pub async fn list_items(
    tx: &mut Transaction<'_, Sqlite>,
    media_type: Option<MediaType>,
) -> Result<Vec<Item>, Error> {
    let rows = match media_type {
        Some(media) => {
            query(
                "SELECT id, path, media_type, checksum FROM items
                 WHERE media_type = ?1 ORDER BY path",
            )
            .bind(media.as_str())
            .fetch_all(&mut **tx)
            .await?
        }
        None => {
            query("SELECT id, path, media_type, checksum FROM items ORDER BY path")
                .fetch_all(&mut **tx)
                .await?
        }
    };

    Ok(rows.iter().map(item_from_row).collect())
}

/// Insert an item unless its path is already known
pub async fn insert_item(
    tx: &mut Transaction<'_, Sqlite>,
    path: &Path,
    media_type: MediaType,
) -> Result<Option<Item>, Error> {
    let path_str = crate::storable_path(path)?;
    let now = chrono::Utc::now().timestamp();

    let result = query(
        "INSERT OR IGNORE INTO items (path, media_type, checksum, added_at)
         VALUES (?1, ?2, NULL, ?3)",
    )
    .bind(path_str)
    .bind(media_type.as_str())
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Item {
        id: result.last_insert_rowid(),
        path: path.to_path_buf(),
        media_type,
        checksum: None,
    }))
}

/// Store a checksum; returns the number of rows changed
pub async fn set_checksum(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    checksum: &str,
) -> Result<u64, Error> {
    let now = chrono::Utc::now().timestamp();

    let result = query("UPDATE items SET checksum = ?1, checksum_at = ?2 WHERE id = ?3")
        .bind(checksum)
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
