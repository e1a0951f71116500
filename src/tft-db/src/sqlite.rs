//! SQLite implementation using rusqlite (synchronous).
//!
//! This implementation is used by the CLI tool.

use crate::repository::*;
use crate::types::*;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tft_meta::Item;

/// Default database location
pub const DEFAULT_DB_PATH: &str = "share/tft.db";

const ITEM_COLUMNS: &str = r#"api_name, description, effects, from_coord, icon, id, name, "unique""#;

/// SQLite-backed metadata database
pub struct SqliteDb {
    conn: Connection,
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemRow> {
    Ok(ItemRow {
        api_name: row.get(0)?,
        description: row.get(1)?,
        effects: row.get(2)?,
        from_coord: row.get(3)?,
        icon: row.get(4)?,
        id: row.get(5)?,
        name: row.get(6)?,
        unique: row.get(7)?,
    })
}

fn upsert_row(conn: &Connection, row: &ItemRow) -> RepoResult<()> {
    conn.execute(
        &format!(
            r#"INSERT INTO {ITEMS_TABLE} ({ITEM_COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(api_name) DO UPDATE SET
                description = excluded.description,
                effects = excluded.effects,
                from_coord = excluded.from_coord,
                icon = excluded.icon,
                id = excluded.id,
                name = excluded.name,
                "unique" = excluded."unique""#
        ),
        params![
            row.api_name,
            row.description,
            row.effects,
            row.from_coord,
            row.icon,
            row.id,
            row.name,
            row.unique,
        ],
    )
    .map_err(|e| RepoError::Database(e.to_string()))?;
    Ok(())
}

impl SqliteDb {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl ItemsRepository for SqliteDb {
    fn init(&self) -> RepoResult<()> {
        self.conn
            .execute_batch(&format!(
                r#"
            CREATE TABLE IF NOT EXISTS {ITEMS_TABLE} (
                api_name TEXT PRIMARY KEY NOT NULL,
                description TEXT,
                effects TEXT,
                from_coord TEXT,
                icon TEXT,
                id BIGINT,
                name TEXT,
                "unique" BOOLEAN
            );
            "#
            ))
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }

    fn upsert_item(&self, row: &ItemRow) -> RepoResult<()> {
        upsert_row(&self.conn, row)
    }

    fn get_item(&self, api_name: &str) -> RepoResult<Option<ItemRow>> {
        self.conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM {ITEMS_TABLE} WHERE api_name = ?1"),
                params![api_name],
                row_to_item,
            )
            .optional()
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    fn list_items(&self) -> RepoResult<Vec<ItemRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM {ITEMS_TABLE} ORDER BY api_name"
            ))
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_item)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(rows)
    }

    fn delete_item(&self, api_name: &str) -> RepoResult<bool> {
        let rows = self
            .conn
            .execute(
                &format!("DELETE FROM {ITEMS_TABLE} WHERE api_name = ?1"),
                params![api_name],
            )
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(rows > 0)
    }

    fn count_items(&self) -> RepoResult<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {ITEMS_TABLE}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

impl BulkRepository for SqliteDb {
    fn upsert_items(&self, items: &[Item]) -> RepoResult<BulkResult> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut result = BulkResult::default();
        for (index, item) in items.iter().enumerate() {
            let row = match ItemRow::try_from(item) {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Not storing item #{}: {}", index, e);
                    result.failed += 1;
                    result.errors.push((format!("#{}", index), e.to_string()));
                    continue;
                }
            };
            // Database errors abort the whole batch
            upsert_row(&tx, &row)?;
            result.succeeded += 1;
        }

        tx.commit()
            .map_err(|e| RepoError::Database(e.to_string()))?;
        tracing::debug!(
            "Stored {} items in {} ({} skipped)",
            result.succeeded,
            ITEMS_TABLE,
            result.failed
        );
        Ok(result)
    }
}
