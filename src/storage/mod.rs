pub mod memory;
pub mod message_db;

pub use memory::MemoryStore;
pub use message_db::SqliteStore;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::common::Message;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("message store lock poisoned")]
    Poisoned,
}

/// Where posted messages live. The gateway only appends and lists.
pub trait MessageStore: Send + Sync {
    fn append(&self, user: String, content: String) -> Result<Message, StoreError>;

    /// Every message, in append order.
    fn all(&self) -> Result<Vec<Message>, StoreError>;
}

/// Pick the store backend: SQLite when a database path is configured,
/// memory otherwise.
pub fn open_store(database: Option<&str>) -> Result<Arc<dyn MessageStore>, StoreError> {
    match database {
        Some(path) => {
            ensure_parent_dir(path)?;
            log::info!("Storing messages in {path}");
            Ok(Arc::new(SqliteStore::with_path(path)?))
        }
        None => {
            log::info!("Storing messages in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Ensure the directory holding the database file exists
fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
