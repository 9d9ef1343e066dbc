//! Domain records for every dashboard store.
//!
//! # Responsibility
//! - Define persisted entity shapes plus their `New*` drafts and `*Patch`
//!   partial updates.
//!
//! # Invariants
//! - Every entity carries an `EntityId` assigned at creation and never reused.
//! - Cross-store links are plain id fields; they never own the target.

use uuid::Uuid;

pub mod finance;
pub mod habit;
pub mod identity;
pub mod productivity;
pub mod vision;

/// Stable identifier shared by all entity kinds.
pub type EntityId = Uuid;

/// Non-owning reference to a `Category`.
pub type CategoryId = EntityId;

/// Non-owning reference to a `Habit`.
pub type HabitId = EntityId;
