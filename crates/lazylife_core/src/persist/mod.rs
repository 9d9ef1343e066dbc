//! Persistence adapter and durable slot backends.
//!
//! # Responsibility
//! - Map each store to one named slot holding its full snapshot.
//! - Report save/load failures as values; callers decide how loud to be.
//!
//! # Invariants
//! - A failed save never rolls back the in-memory mutation.
//! - A slot that failed to decode is never overwritten implicitly.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod slot_store;

pub use adapter::{PersistenceAdapter, RestoreSource, Restored, SCHEMA_VERSION};
pub use slot_store::{MemorySlotStore, SlotError, SlotResult, SlotStore, SqliteSlotStore};

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    Deserialize {
        key: String,
        source: serde_json::Error,
    },
    Slot {
        key: String,
        source: SlotError,
    },
    UnsupportedSchemaVersion {
        key: String,
        found: u32,
        supported: u32,
    },
    /// The slot failed to decode at load; writes are held back until reset.
    Unrestored { key: String },
}

impl PersistError {
    /// Slot key the failed operation targeted.
    pub fn key(&self) -> &str {
        match self {
            Self::Serialize { key, .. }
            | Self::Deserialize { key, .. }
            | Self::Slot { key, .. }
            | Self::UnsupportedSchemaVersion { key, .. }
            | Self::Unrestored { key } => key,
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize { key, source } => write!(f, "cannot serialize `{key}`: {source}"),
            Self::Deserialize { key, source } => {
                write!(f, "cannot deserialize `{key}`: {source}")
            }
            Self::Slot { key, source } => write!(f, "slot `{key}`: {source}"),
            Self::UnsupportedSchemaVersion {
                key,
                found,
                supported,
            } => write!(
                f,
                "slot `{key}` has schema version {found}, newer than supported {supported}"
            ),
            Self::Unrestored { key } => write!(
                f,
                "slot `{key}` could not be restored; refusing to overwrite it"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize { source, .. } | Self::Deserialize { source, .. } => Some(source),
            Self::Slot { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } | Self::Unrestored { .. } => None,
        }
    }
}
