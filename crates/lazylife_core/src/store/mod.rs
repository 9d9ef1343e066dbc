//! In-memory entity stores, one per dashboard domain.
//!
//! # Responsibility
//! - Own each domain's collections and expose CRUD plus domain mutations.
//! - Guard deletes that would leave a dangling reference.
//!
//! # Invariants
//! - Stores are plain data; persistence and notification live in
//!   `crate::context`.
//! - Not-found on update/delete is a no-op reported as `false`, never an error.

use crate::model::{CategoryId, HabitId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection;
pub mod finance_store;
pub mod habit_store;
pub mod identity_store;
pub mod productivity_store;
pub mod vision_store;

pub use collection::{Collection, Draft, Patch, Record};
pub use finance_store::FinanceStore;
pub use habit_store::HabitStore;
pub use identity_store::IdentityStore;
pub use productivity_store::ProductivityStore;
pub use vision_store::VisionStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejected mutation; store state is unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Habit is still listed by one or more rituals.
    HabitInUse {
        habit_id: HabitId,
        rituals: Vec<String>,
    },
    /// Category is still used by one or more transactions.
    CategoryInUse {
        category_id: CategoryId,
        transactions: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HabitInUse { rituals, .. } => write!(
                f,
                "Cannot delete habit: it is used in rituals: {}",
                rituals.join(", ")
            ),
            Self::CategoryInUse { transactions, .. } => write!(
                f,
                "Cannot delete category: it is used by {transactions} transaction(s)"
            ),
        }
    }
}

impl Error for StoreError {}

/// Store that can be persisted to one durable slot.
///
/// `initialized` is persisted with the state and gates first-run seeding.
pub trait DomainStore: Default + Serialize + DeserializeOwned {
    /// Fixed slot key for this store.
    const SLOT_KEY: &'static str;

    fn is_initialized(&self) -> bool;

    fn mark_initialized(&mut self);

    /// Fills empty collections with the first-run sample data.
    fn seed_defaults(&mut self) {}
}
