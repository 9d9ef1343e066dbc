//! Insertion-ordered entity collection shared by all stores.
//!
//! # Invariants
//! - Ids are unique within a collection and generated on `add` only.
//! - `update` never changes an entity id.
//! - Unknown ids make `update`/`remove` a silent no-op.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity stored in a [`Collection`].
pub trait Record {
    fn id(&self) -> EntityId;
}

/// Entity input without an id; turned into a record on `add`.
pub trait Draft {
    type Record: Record;

    fn into_record(self, id: EntityId) -> Self::Record;
}

/// Shallow partial update: `None` fields leave the target untouched.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record built from `draft` and returns its fresh id.
    pub fn add<D>(&mut self, draft: D) -> EntityId
    where
        D: Draft<Record = T>,
    {
        let id = self.fresh_id();
        self.items.push(draft.into_record(id));
        id
    }

    /// Merges `patch` into the record with `id`.
    ///
    /// Returns `false` when no such record exists.
    pub fn update<P>(&mut self, id: EntityId, patch: P) -> bool
    where
        P: Patch<T>,
    {
        match self.get_mut(id) {
            Some(record) => {
                patch.apply_to(record);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the record with `id`, if present.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fresh_id(&self) -> EntityId {
        loop {
            let candidate = Uuid::new_v4();
            if !self.contains(candidate) {
                return candidate;
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
