//! Repository traits for refined metadata storage.
//!
//! These traits define the interface for all database backends.

use crate::types::ItemRow;
use tft_meta::Item;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Item has no api_name: {0}")]
    MissingKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Trait for item table operations (synchronous version for CLI)
pub trait ItemsRepository {
    /// Initialize the database schema
    fn init(&self) -> RepoResult<()>;

    /// Insert a row, replacing any existing row with the same api_name
    fn upsert_item(&self, row: &ItemRow) -> RepoResult<()>;

    /// Get an item by api_name
    fn get_item(&self, api_name: &str) -> RepoResult<Option<ItemRow>>;

    /// List all items ordered by api_name
    fn list_items(&self) -> RepoResult<Vec<ItemRow>>;

    /// Delete an item
    fn delete_item(&self, api_name: &str) -> RepoResult<bool>;

    /// Number of stored items
    fn count_items(&self) -> RepoResult<i64>;
}

/// Extension trait for bulk operations
pub trait BulkRepository {
    /// Store refined items in a single transaction
    ///
    /// Items that cannot be stored (no api_name) are reported, not fatal.
    fn upsert_items(&self, items: &[Item]) -> RepoResult<BulkResult>;
}

/// Result of a bulk operation
#[derive(Debug, Clone, Default)]
pub struct BulkResult {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(String, String)>, // (item label, error message)
}
