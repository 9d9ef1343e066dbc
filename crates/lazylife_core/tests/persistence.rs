use chrono::{NaiveDate, TimeZone, Utc};
use lazylife_core::model::finance::{
    InvestmentType, NewCategory, NewInvestment, NewPortfolio, NewTransaction, TransactionType,
};
use lazylife_core::model::habit::{Difficulty, Frequency, NewHabit};
use lazylife_core::model::productivity::{NewFocusSession, NewNote};
use lazylife_core::model::vision::{GoalStatus, NewGoal, Timeframe};
use lazylife_core::{
    AppContext, CoreConfig, DomainStore, FinanceStore, HabitStore, LogNotifier, MemorySlotStore,
    PersistError, PersistenceAdapter, ProductivityStore, RecordingNotifier, RestoreSource,
    SlotError, SlotStore, SqliteSlotStore, StorePhase, VisionStore,
};
use std::cell::Cell;
use std::rc::Rc;

/// Slot backend whose writes can be switched off mid-session.
#[derive(Default)]
struct FlakySlotStore {
    inner: MemorySlotStore,
    writes_fail: Cell<bool>,
}

impl SlotStore for FlakySlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>, SlotError> {
        self.inner.read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), SlotError> {
        if self.writes_fail.get() {
            return Err(SlotError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.write_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> Result<bool, SlotError> {
        self.inner.remove_slot(key)
    }
}

fn populated_finance() -> FinanceStore {
    let mut store = FinanceStore::new();
    let salary = store.add_category(NewCategory {
        name: "Salary".to_string(),
        kind: TransactionType::Income,
        color: "#22c55e".to_string(),
    });
    store.add_transaction(NewTransaction {
        description: "March salary".to_string(),
        kind: TransactionType::Income,
        amount: 4200.0,
        date: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
        category_id: salary,
    });
    let portfolio = store.add_portfolio(NewPortfolio {
        name: "Brokerage".to_string(),
    });
    store.add_investment_to_portfolio(
        portfolio,
        NewInvestment {
            name: "BTC".to_string(),
            kind: InvestmentType::Crypto,
            quantity: 0.25,
            purchase_price: 30000.0,
            current_price: 64000.0,
        },
    );
    store.mark_initialized();
    store
}

#[test]
fn save_then_load_round_trips_every_store() {
    let adapter = PersistenceAdapter::new(Rc::new(SqliteSlotStore::open_in_memory().unwrap()));

    let finance = populated_finance();
    adapter.save(FinanceStore::SLOT_KEY, &finance).unwrap();
    let loaded: FinanceStore = adapter.load(FinanceStore::SLOT_KEY).unwrap().unwrap();
    assert_eq!(loaded, finance);

    let mut vision = VisionStore::new();
    vision.add_goal(NewGoal {
        title: "Write a book".to_string(),
        status: GoalStatus::NotStarted,
        milestones: vec!["Outline".to_string()],
        category: "creative".to_string(),
        timeframe: Timeframe::LongTerm,
        deadline: None,
    });
    adapter.save(VisionStore::SLOT_KEY, &vision).unwrap();
    let loaded: VisionStore = adapter.load(VisionStore::SLOT_KEY).unwrap().unwrap();
    assert_eq!(loaded, vision);

    let mut productivity = ProductivityStore::new();
    productivity.add_note(NewNote {
        title: "Retro".to_string(),
        content: "## Went well\n- focus blocks".to_string(),
    });
    productivity.log_focus_session(NewFocusSession {
        label: "writing".to_string(),
        started_at: Utc.with_ymd_and_hms(2025, 4, 1, 8, 30, 0).unwrap(),
        duration_minutes: 45,
    });
    adapter.save(ProductivityStore::SLOT_KEY, &productivity).unwrap();
    let loaded: ProductivityStore = adapter.load(ProductivityStore::SLOT_KEY).unwrap().unwrap();
    assert_eq!(loaded, productivity);
}

#[test]
fn absent_slot_loads_as_none() {
    let adapter = PersistenceAdapter::new(Rc::new(MemorySlotStore::new()));
    let loaded: Option<HabitStore> = adapter.load(HabitStore::SLOT_KEY).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_slot_reports_deserialize_error() {
    let slots = Rc::new(MemorySlotStore::new());
    slots
        .write_slot(FinanceStore::SLOT_KEY, r#"{"schema_version": 1, "state": {"debts": 3}}"#)
        .unwrap();
    let adapter = PersistenceAdapter::new(slots);

    let err = adapter.load::<FinanceStore>(FinanceStore::SLOT_KEY).unwrap_err();
    assert!(matches!(err, PersistError::Deserialize { .. }));
    assert_eq!(err.key(), FinanceStore::SLOT_KEY);
}

#[test]
fn first_load_seeds_once_and_emptied_store_stays_empty() {
    let slots: Rc<dyn SlotStore> = Rc::new(MemorySlotStore::new());

    let mut first = AppContext::new(slots.clone(), Rc::new(LogNotifier));
    assert_eq!(first.habits.phase(), StorePhase::Uninitialized);
    first.load_all();
    assert!(first.is_ready());
    assert_eq!(first.habits.restore_source(), Some(RestoreSource::Empty));
    assert!(!first.habits.state().habits().is_empty());
    assert!(!first.finance.state().categories().is_empty());

    let ritual_ids: Vec<_> = first.habits.state().rituals().iter().map(|r| r.id).collect();
    for id in ritual_ids {
        first.habits.mutate(|store| store.delete_ritual(id));
    }
    let habit_ids: Vec<_> = first.habits.state().habits().iter().map(|h| h.id).collect();
    for id in habit_ids {
        first.habits.delete_habit(id).unwrap();
    }
    assert!(first.habits.state().habits().is_empty());

    let mut second = AppContext::new(slots, Rc::new(LogNotifier));
    second.load_all();
    assert_eq!(second.habits.restore_source(), Some(RestoreSource::Slot));
    assert!(second.habits.state().habits().is_empty());
    assert!(second.habits.state().rituals().is_empty());
}

#[test]
fn seeded_defaults_survive_reload_without_reseeding() {
    let slots: Rc<dyn SlotStore> = Rc::new(MemorySlotStore::new());
    let mut first = AppContext::new(slots.clone(), Rc::new(LogNotifier));
    first.load_all();
    let seeded_ids: Vec<_> = first.habits.state().habits().iter().map(|h| h.id).collect();

    let mut second = AppContext::new(slots, Rc::new(LogNotifier));
    second.load_all();
    let reloaded_ids: Vec<_> = second.habits.state().habits().iter().map(|h| h.id).collect();
    assert_eq!(reloaded_ids, seeded_ids);
}

const NEWER_HABIT_SLOT: &str = r#"{"schema_version": 2, "state": {"habits": [], "rituals": [], "streak_freezes": 3, "initialized": true}}"#;

#[test]
fn loading_a_newer_slot_leaves_it_untouched() {
    let slots = Rc::new(MemorySlotStore::new());
    slots
        .write_slot(HabitStore::SLOT_KEY, NEWER_HABIT_SLOT)
        .unwrap();

    let mut context = AppContext::new(slots.clone(), Rc::new(LogNotifier));
    context.load_all();
    assert!(context.is_ready());
    assert_eq!(context.habits.restore_source(), Some(RestoreSource::Fallback));
    assert!(context.habits.seed_saved().is_none());
    assert!(context.habits.state().habits().is_empty());
    assert_eq!(
        slots.read_slot(HabitStore::SLOT_KEY).unwrap().as_deref(),
        Some(NEWER_HABIT_SLOT)
    );

    let committed = context.habits.mutate(|store| {
        store.add_habit(NewHabit {
            name: "Stretch".to_string(),
            category: "fitness".to_string(),
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
        })
    });
    assert!(matches!(
        committed.saved,
        Err(PersistError::Unrestored { ref key }) if key == HabitStore::SLOT_KEY
    ));
    assert!(context.habits.state().habit(committed.value).is_some());
    assert_eq!(
        slots.read_slot(HabitStore::SLOT_KEY).unwrap().as_deref(),
        Some(NEWER_HABIT_SLOT)
    );

    // Other stores restored normally and were seeded as usual.
    assert!(slots.read_slot(FinanceStore::SLOT_KEY).unwrap().is_some());
}

#[test]
fn reset_reclaims_a_slot_that_failed_to_restore() {
    let slots = Rc::new(MemorySlotStore::new());
    slots
        .write_slot(HabitStore::SLOT_KEY, NEWER_HABIT_SLOT)
        .unwrap();
    let mut context = AppContext::new(slots.clone(), Rc::new(LogNotifier));
    context.load_all();

    context.habits.reset().unwrap();
    assert_eq!(context.habits.restore_source(), Some(RestoreSource::Empty));
    assert!(matches!(context.habits.seed_saved(), Some(Ok(()))));
    assert_eq!(context.habits.state().habits().len(), 4);

    let adapter = PersistenceAdapter::new(slots);
    let durable: HabitStore = adapter.load(HabitStore::SLOT_KEY).unwrap().unwrap();
    assert_eq!(durable, *context.habits.state());
}

#[test]
fn corrupt_slot_is_not_reseeded() {
    let slots = Rc::new(MemorySlotStore::new());
    slots
        .write_slot(HabitStore::SLOT_KEY, r#"{"schema_version": 1, "state": {"habits": 7}}"#)
        .unwrap();

    let mut context = AppContext::new(slots.clone(), Rc::new(LogNotifier));
    context.load_all();
    assert_eq!(context.habits.restore_source(), Some(RestoreSource::Fallback));
    assert!(context.habits.state().habits().is_empty());
    assert!(context.habits.state().rituals().is_empty());
    assert_eq!(
        slots.read_slot(HabitStore::SLOT_KEY).unwrap().as_deref(),
        Some(r#"{"schema_version": 1, "state": {"habits": 7}}"#)
    );
}

#[test]
fn failed_save_keeps_in_memory_mutation() {
    let slots = Rc::new(FlakySlotStore::default());
    let mut context = AppContext::new(slots.clone(), Rc::new(RecordingNotifier::new()));
    context.load_all();

    slots.writes_fail.set(true);
    let committed = context.habits.mutate(|store| {
        store.add_habit(NewHabit {
            name: "Journal".to_string(),
            category: "mind".to_string(),
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
        })
    });
    assert!(!committed.is_saved());
    assert!(matches!(
        committed.saved,
        Err(PersistError::Slot {
            source: SlotError::Unavailable(_),
            ..
        })
    ));
    assert!(context.habits.state().habit(committed.value).is_some());

    let adapter = PersistenceAdapter::new(slots.clone());
    let durable: HabitStore = adapter.load(HabitStore::SLOT_KEY).unwrap().unwrap();
    assert!(durable.habit(committed.value).is_none());

    slots.writes_fail.set(false);
    let toggled = context.habits.toggle_habit(committed.value);
    assert!(toggled.is_saved());
    let durable: HabitStore = adapter.load(HabitStore::SLOT_KEY).unwrap().unwrap();
    assert_eq!(durable, *context.habits.state());
}

#[test]
fn reset_returns_store_to_first_run_state() {
    let mut context = AppContext::in_memory(Rc::new(LogNotifier));
    let ids: Vec<_> = context
        .finance
        .state()
        .categories()
        .iter()
        .map(|c| c.id)
        .collect();
    for id in ids {
        context.finance.delete_category(id).unwrap();
    }
    assert!(context.finance.state().categories().is_empty());

    context.finance.reset().unwrap();
    assert_eq!(context.finance.phase(), StorePhase::Ready);
    assert_eq!(context.finance.state().categories().len(), 6);
}

#[test]
fn context_on_disk_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::with_data_dir(dir.path()).unwrap();

    let goal_id = {
        let mut context = AppContext::open(&config, Rc::new(LogNotifier)).unwrap();
        context
            .vision
            .mutate(|store| {
                store.add_goal(NewGoal {
                    title: "Run 10k".to_string(),
                    status: GoalStatus::InProgress,
                    milestones: vec!["5k".to_string(), "8k".to_string()],
                    category: "health".to_string(),
                    timeframe: Timeframe::ShortTerm,
                    deadline: NaiveDate::from_ymd_opt(2025, 9, 1),
                })
            })
            .value
    };

    let context = AppContext::open(&config, Rc::new(LogNotifier)).unwrap();
    let goal = context.vision.state().goal(goal_id).unwrap();
    assert_eq!(goal.title, "Run 10k");
    assert_eq!(goal.milestones.len(), 2);

    let keys = SqliteSlotStore::open(config.slot_db_path())
        .unwrap()
        .keys()
        .unwrap();
    assert_eq!(
        keys,
        [
            "finance-store",
            "habit-store",
            "identity-store",
            "productivity-store",
            "vision-store"
        ]
    );
}
