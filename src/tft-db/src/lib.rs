//! Storage for refined TFT metadata
//!
//! Refined items are stored in the `api_documents_items` table, one row per
//! item keyed by its API name. Effects and component ids are kept as JSON
//! text columns.
//!
//! # Features
//!
//! - `sqlite-sync` (default) - Synchronous SQLite using rusqlite (for CLI)
//!
//! # Example
//!
//! ```no_run
//! use tft_db::{ItemsRepository, SqliteDb};
//!
//! let db = SqliteDb::open("tft.db").unwrap();
//! db.init().unwrap();
//!
//! for row in db.list_items().unwrap() {
//!     println!("{}", row.api_name);
//! }
//! ```

pub mod repository;
pub mod types;

#[cfg(feature = "sqlite-sync")]
pub mod sqlite;

pub use repository::{BulkRepository, BulkResult, ItemsRepository, RepoError, RepoResult};
pub use types::{ItemRow, ITEMS_TABLE};

#[cfg(feature = "sqlite-sync")]
pub use sqlite::{SqliteDb, DEFAULT_DB_PATH};
