use rusqlite::{Connection, Result as SqlResult, params};
use std::path::Path;
use std::sync::Mutex;

use async_graphql::ID;
use uuid::Uuid;

use super::{MessageStore, StoreError};
use crate::common::Message;

/// SQLite-backed message store; messages survive a server restart.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the message database at `path`.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn init_schema(conn: &Connection) -> SqlResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS messages (
            id TEXT PRIMARY KEY,
            user TEXT NOT NULL,
            content TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

impl MessageStore for SqliteStore {
    fn append(&self, user: String, content: String) -> Result<Message, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO messages (id, user, content) VALUES (?1, ?2, ?3)",
            params![id, user, content],
        )?;

        Ok(Message {
            id: ID(id),
            user,
            content,
        })
    }

    /// All messages in insertion order.
    fn all(&self) -> Result<Vec<Message>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT id, user, content FROM messages ORDER BY rowid ASC")?;

        let messages = stmt
            .query_map([], |row| {
                Ok(Message {
                    id: ID(row.get(0)?),
                    user: row.get(1)?,
                    content: row.get(2)?,
                })
            })?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_list_in_order() {
        let store = SqliteStore::in_memory().unwrap();
        let first = store.append("Ryan".into(), "hello".into()).unwrap();
        let second = store.append("Ana".into(), "hi Ryan".into()).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = SqliteStore::in_memory().unwrap();
        let a = store.append("Ryan".into(), "same".into()).unwrap();
        let b = store.append("Ryan".into(), "same".into()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_reopen_keeps_messages() {
        let path = std::env::temp_dir().join(format!("graphql_chat_{}.db", Uuid::new_v4()));
        {
            let store = SqliteStore::with_path(&path).unwrap();
            store.append("Ryan".into(), "persisted".into()).unwrap();
        }

        let store = SqliteStore::with_path(&path).unwrap();
        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "persisted");

        drop(store);
        let _ = std::fs::remove_file(&path);
    }
}
