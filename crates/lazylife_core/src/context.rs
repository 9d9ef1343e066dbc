//! Application-owned container for every store.
//!
//! # Responsibility
//! - Drive each store through `Uninitialized -> Loading -> Ready`.
//! - Persist a snapshot after every mutation and report the save outcome.
//! - Route refused mutations to the view's notifier.
//!
//! # Invariants
//! - One `AppContext` per session, owned by the application root and passed
//!   by reference; there is no global store.
//! - `Ready` is terminal; mutations run only on a ready store.
//! - A refused mutation leaves state untouched and skips persistence.
//! - A store restored by fallback never writes to its slot until `reset`.

use crate::config::CoreConfig;
use crate::model::finance::{NewInvestment, TransactionType};
use crate::model::{CategoryId, EntityId, HabitId};
use crate::notify::Notifier;
use crate::persist::{
    MemorySlotStore, PersistError, PersistResult, PersistenceAdapter, RestoreSource, SlotResult,
    SlotStore, SqliteSlotStore,
};
use crate::stats::DashboardSummary;
use crate::store::{
    DomainStore, FinanceStore, HabitStore, IdentityStore, ProductivityStore, StoreResult,
    VisionStore,
};
use chrono::NaiveDate;
use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;

/// Lifecycle of one store within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Uninitialized,
    Loading,
    Ready,
}

/// Result of an applied mutation.
///
/// `value` is what the store operation returned; `saved` is the outcome of
/// the follow-up snapshot. A failed save does not undo the mutation.
#[derive(Debug)]
pub struct Committed<R> {
    pub value: R,
    pub saved: PersistResult<()>,
}

impl<R> Committed<R> {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

/// One domain store bound to its slot and to the view's notifier.
pub struct StoreHandle<S: DomainStore> {
    state: S,
    phase: StorePhase,
    source: Option<RestoreSource>,
    seed_saved: Option<PersistResult<()>>,
    adapter: PersistenceAdapter,
    notifier: Rc<dyn Notifier>,
}

impl<S: DomainStore> StoreHandle<S> {
    pub fn new(adapter: PersistenceAdapter, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            state: S::default(),
            phase: StorePhase::Uninitialized,
            source: None,
            seed_saved: None,
            adapter,
            notifier,
        }
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Where the state was restored from; `None` before loading.
    pub fn restore_source(&self) -> Option<RestoreSource> {
        self.source
    }

    /// Outcome of writing freshly seeded defaults during the last load.
    ///
    /// `None` when that load did not seed.
    pub fn seed_saved(&self) -> Option<&PersistResult<()>> {
        self.seed_saved.as_ref()
    }

    /// Current snapshot. Empty until [`StoreHandle::load`] ran.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Restores state from the slot. No-op once ready.
    pub fn load(&mut self) -> &S {
        if self.phase == StorePhase::Ready {
            return &self.state;
        }

        self.phase = StorePhase::Loading;
        let restored = self.adapter.restore::<S>();
        self.state = restored.state;
        self.source = Some(restored.source);
        // Persist the initialized flag so defaults are never re-seeded.
        self.seed_saved = restored.seeded.then(|| self.persist());
        self.phase = StorePhase::Ready;
        info!(
            "event=store_load module=context status=ok key={} source={:?} seeded={}",
            S::SLOT_KEY,
            restored.source,
            restored.seeded
        );
        &self.state
    }

    /// Applies an infallible mutation and snapshots the result.
    pub fn mutate<R>(&mut self, apply: impl FnOnce(&mut S) -> R) -> Committed<R> {
        self.load();
        let value = apply(&mut self.state);
        Committed {
            value,
            saved: self.persist(),
        }
    }

    /// Applies a guarded mutation.
    ///
    /// On `Err` the notifier receives the error text and nothing is saved.
    pub fn try_mutate<R>(
        &mut self,
        apply: impl FnOnce(&mut S) -> StoreResult<R>,
    ) -> StoreResult<Committed<R>> {
        self.load();
        match apply(&mut self.state) {
            Ok(value) => Ok(Committed {
                value,
                saved: self.persist(),
            }),
            Err(err) => {
                self.notifier.notify_failure(&err.to_string());
                Err(err)
            }
        }
    }

    /// Forgets the persisted slot and reloads first-run state.
    ///
    /// This is also how a store restored by fallback regains write access.
    pub fn reset(&mut self) -> PersistResult<()> {
        self.adapter.clear::<S>()?;
        self.phase = StorePhase::Uninitialized;
        self.load();
        Ok(())
    }

    fn persist(&self) -> PersistResult<()> {
        let started_at = Instant::now();
        let saved = if self.source == Some(RestoreSource::Fallback) {
            Err(PersistError::Unrestored {
                key: S::SLOT_KEY.to_string(),
            })
        } else {
            self.adapter.save(S::SLOT_KEY, &self.state)
        };
        if let Err(err) = &saved {
            warn!(
                "event=slot_save module=context status=error key={} duration_ms={} error={}",
                S::SLOT_KEY,
                started_at.elapsed().as_millis(),
                err
            );
        }
        saved
    }
}

impl StoreHandle<HabitStore> {
    /// Deletes a habit; refused (and notified) while a ritual lists it.
    pub fn delete_habit(&mut self, id: HabitId) -> StoreResult<Committed<bool>> {
        self.try_mutate(|store| store.delete_habit(id))
    }

    pub fn toggle_habit(&mut self, id: HabitId) -> Committed<Option<bool>> {
        self.mutate(|store| store.toggle_habit(id))
    }

    pub fn start_new_day(&mut self) -> Committed<()> {
        self.mutate(HabitStore::start_new_day)
    }
}

impl StoreHandle<FinanceStore> {
    /// Deletes a category; refused (and notified) while transactions use it.
    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<Committed<bool>> {
        self.try_mutate(|store| store.delete_category(id))
    }

    pub fn add_investment_to_portfolio(
        &mut self,
        portfolio_id: EntityId,
        investment: NewInvestment,
    ) -> Committed<Option<EntityId>> {
        self.mutate(|store| store.add_investment_to_portfolio(portfolio_id, investment))
    }

    /// First category of `kind`, handy as a default selection.
    pub fn default_category(&self, kind: TransactionType) -> Option<CategoryId> {
        self.state
            .categories()
            .iter()
            .find(|category| category.kind == kind)
            .map(|category| category.id)
    }
}

/// Every dashboard store for one session.
pub struct AppContext {
    pub finance: StoreHandle<FinanceStore>,
    pub habits: StoreHandle<HabitStore>,
    pub vision: StoreHandle<VisionStore>,
    pub identity: StoreHandle<IdentityStore>,
    pub productivity: StoreHandle<ProductivityStore>,
}

impl AppContext {
    /// Builds unloaded stores over `slots`; call [`AppContext::load_all`].
    pub fn new(slots: Rc<dyn SlotStore>, notifier: Rc<dyn Notifier>) -> Self {
        let adapter = PersistenceAdapter::new(slots);
        Self {
            finance: StoreHandle::new(adapter.clone(), notifier.clone()),
            habits: StoreHandle::new(adapter.clone(), notifier.clone()),
            vision: StoreHandle::new(adapter.clone(), notifier.clone()),
            identity: StoreHandle::new(adapter.clone(), notifier.clone()),
            productivity: StoreHandle::new(adapter, notifier),
        }
    }

    /// Opens the slot database under `config.data_dir` and loads every store.
    pub fn open(config: &CoreConfig, notifier: Rc<dyn Notifier>) -> SlotResult<Self> {
        let slots = SqliteSlotStore::open(config.slot_db_path())?;
        let mut context = Self::new(Rc::new(slots), notifier);
        context.load_all();
        Ok(context)
    }

    /// Loaded session whose state lives only in memory.
    pub fn in_memory(notifier: Rc<dyn Notifier>) -> Self {
        let mut context = Self::new(Rc::new(MemorySlotStore::new()), notifier);
        context.load_all();
        context
    }

    pub fn load_all(&mut self) {
        self.finance.load();
        self.habits.load();
        self.vision.load();
        self.identity.load();
        self.productivity.load();
    }

    pub fn is_ready(&self) -> bool {
        [
            self.finance.phase(),
            self.habits.phase(),
            self.vision.phase(),
            self.identity.phase(),
            self.productivity.phase(),
        ]
        .iter()
        .all(|phase| *phase == StorePhase::Ready)
    }

    /// Recomputes the dashboard headline figures for `today`.
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary::compute(
            self.finance.state(),
            self.habits.state(),
            self.vision.state(),
            self.identity.state(),
            self.productivity.state(),
            today,
        )
    }
}
