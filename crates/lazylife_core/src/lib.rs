//! Core domain state for the LazyLife dashboard.
//! Stores, derived statistics and slot persistence live here; views only call in.

pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod persist;
pub mod preview;
pub mod stats;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use context::{AppContext, Committed, StoreHandle, StorePhase};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::{CategoryId, EntityId, HabitId};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use persist::{
    MemorySlotStore, PersistError, PersistResult, PersistenceAdapter, RestoreSource, SlotError,
    SlotStore, SqliteSlotStore,
};
pub use stats::DashboardSummary;
pub use store::{
    Collection, DomainStore, FinanceStore, HabitStore, IdentityStore, ProductivityStore,
    StoreError, StoreResult, VisionStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
