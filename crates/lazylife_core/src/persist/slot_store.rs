//! Durable key-value slots.
//!
//! # Responsibility
//! - Read and overwrite one text value per slot key.
//!
//! # Invariants
//! - `write_slot` replaces the whole value; there are no partial writes.
//! - Reading an unknown key is `Ok(None)`, not an error.

use crate::db::{open_db, open_db_in_memory, DbError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type SlotResult<T> = Result<T, SlotError>;

#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "slot storage unavailable: {reason}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage medium behind the persistence adapter.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()>;
    /// Returns whether a value was removed.
    fn remove_slot(&self, key: &str) -> SlotResult<bool>;
}

/// Slots kept in the `slots` table of a SQLite database.
pub struct SqliteSlotStore {
    conn: Connection,
}

impl SqliteSlotStore {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> SlotResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> SlotResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Slot keys currently stored, sorted.
    pub fn keys(&self) -> SlotResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM slots ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=slot_write module=persist status=ok backend=sqlite key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> SlotResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local slots; nothing survives the session.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> SlotResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> SlotResult<bool> {
        Ok(self.slots.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotStore, SlotStore, SqliteSlotStore};

    fn exercise(slots: &dyn SlotStore) {
        assert_eq!(slots.read_slot("habit-store").expect("read"), None);

        slots.write_slot("habit-store", "{\"v\":1}").expect("write");
        slots.write_slot("habit-store", "{\"v\":2}").expect("overwrite");
        assert_eq!(
            slots.read_slot("habit-store").expect("read").as_deref(),
            Some("{\"v\":2}")
        );

        assert!(slots.remove_slot("habit-store").expect("remove"));
        assert!(!slots.remove_slot("habit-store").expect("remove again"));
    }

    #[test]
    fn sqlite_slots_overwrite_and_remove() {
        let slots = SqliteSlotStore::open_in_memory().expect("open");
        exercise(&slots);
        slots.write_slot("b", "2").expect("write");
        slots.write_slot("a", "1").expect("write");
        assert_eq!(slots.keys().expect("keys"), ["a", "b"]);
    }

    #[test]
    fn memory_slots_overwrite_and_remove() {
        let slots = MemorySlotStore::new();
        exercise(&slots);
        assert!(slots.is_empty());
    }
}
