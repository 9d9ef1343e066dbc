//! Snapshot persistence for domain stores.
//!
//! # Responsibility
//! - Serialize a whole store into its slot after each mutation.
//! - Restore a store at startup, seeding first-run defaults.
//!
//! # Invariants
//! - Payloads are a JSON envelope `{"schema_version": N, "state": {...}}`.
//! - Untagged payloads are read as version 0 (bare state).
//! - Restore never fails: unreadable slots fall back to default state.
//! - Seeding happens at most once per slot, gated by the persisted
//!   `initialized` flag, and never on top of a slot that failed to decode.

use super::slot_store::SlotStore;
use super::{PersistError, PersistResult};
use crate::store::DomainStore;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

/// Envelope version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_FIELD: &str = "schema_version";
const STATE_FIELD: &str = "state";

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    schema_version: u32,
    state: &'a S,
}

#[derive(Deserialize)]
struct Envelope<S> {
    schema_version: u32,
    state: S,
}

/// Where a restored state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    /// Decoded from the slot.
    Slot,
    /// Slot was absent.
    Empty,
    /// Slot existed but could not be decoded; its payload is left as is.
    Fallback,
}

#[derive(Debug)]
pub struct Restored<S> {
    pub state: S,
    pub source: RestoreSource,
    /// First-run defaults were applied during this restore.
    pub seeded: bool,
}

/// Reads and writes store snapshots through a shared slot backend.
#[derive(Clone)]
pub struct PersistenceAdapter {
    slots: Rc<dyn SlotStore>,
}

impl PersistenceAdapter {
    pub fn new(slots: Rc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    /// Serializes `state` and overwrites slot `key`.
    ///
    /// # Errors
    /// - `PersistError::Serialize` when the state cannot be encoded.
    /// - `PersistError::Slot` when the backend write fails.
    pub fn save<S: Serialize>(&self, key: &str, state: &S) -> PersistResult<()> {
        let payload = serde_json::to_string(&EnvelopeRef {
            schema_version: SCHEMA_VERSION,
            state,
        })
        .map_err(|source| PersistError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.slots
            .write_slot(key, &payload)
            .map_err(|source| PersistError::Slot {
                key: key.to_string(),
                source,
            })
    }

    /// Reads slot `key`; `Ok(None)` when the slot is absent.
    ///
    /// # Errors
    /// - `PersistError::Slot` when the backend read fails.
    /// - `PersistError::Deserialize` for malformed payloads.
    /// - `PersistError::UnsupportedSchemaVersion` for envelopes newer than
    ///   [`SCHEMA_VERSION`].
    pub fn load<S: DeserializeOwned>(&self, key: &str) -> PersistResult<Option<S>> {
        let payload = self.slots.read_slot(key).map_err(|source| PersistError::Slot {
            key: key.to_string(),
            source,
        })?;
        let Some(payload) = payload else {
            return Ok(None);
        };
        decode_payload(key, &payload).map(Some)
    }

    /// Loads `S` from its slot, falling back to `S::default()`, then seeds
    /// first-run defaults if the store was never initialized.
    ///
    /// A fallback state is returned unseeded so that nothing prompts a
    /// write over the unreadable slot.
    pub fn restore<S: DomainStore>(&self) -> Restored<S> {
        let key = S::SLOT_KEY;
        let (mut state, source) = match self.load::<S>(key) {
            Ok(Some(state)) => (state, RestoreSource::Slot),
            Ok(None) => (S::default(), RestoreSource::Empty),
            Err(err) => {
                warn!(
                    "event=slot_load module=persist status=fallback key={} error={}",
                    key, err
                );
                (S::default(), RestoreSource::Fallback)
            }
        };

        let seeded = source != RestoreSource::Fallback && !state.is_initialized();
        if seeded {
            state.seed_defaults();
            state.mark_initialized();
            info!("event=store_seed module=persist status=ok key={}", key);
        }

        Restored {
            state,
            source,
            seeded,
        }
    }

    /// Drops the slot for `S`; the next restore starts from first-run state.
    pub fn clear<S: DomainStore>(&self) -> PersistResult<bool> {
        self.slots
            .remove_slot(S::SLOT_KEY)
            .map_err(|source| PersistError::Slot {
                key: S::SLOT_KEY.to_string(),
                source,
            })
    }
}

fn decode_payload<S: DeserializeOwned>(key: &str, payload: &str) -> PersistResult<S> {
    let deserialize_error = |source: serde_json::Error| PersistError::Deserialize {
        key: key.to_string(),
        source,
    };
    let value: Value = serde_json::from_str(payload).map_err(deserialize_error)?;

    let is_envelope = value.as_object().is_some_and(|object| {
        object.contains_key(SCHEMA_VERSION_FIELD) && object.contains_key(STATE_FIELD)
    });
    if !is_envelope {
        return serde_json::from_value(value).map_err(deserialize_error);
    }

    let envelope: Envelope<Value> = serde_json::from_value(value).map_err(deserialize_error)?;
    if envelope.schema_version > SCHEMA_VERSION {
        return Err(PersistError::UnsupportedSchemaVersion {
            key: key.to_string(),
            found: envelope.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    serde_json::from_value(envelope.state).map_err(deserialize_error)
}
