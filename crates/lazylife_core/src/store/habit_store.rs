//! Habit and ritual store.
//!
//! # Invariants
//! - A habit listed by any ritual cannot be deleted.
//! - Toggling a habit twice restores `completed_today` and `streak`;
//!   `longest_streak` only grows.

use super::{Collection, DomainStore, Draft, Patch, Record, StoreError, StoreResult};
use crate::model::habit::{
    Difficulty, Frequency, Habit, HabitPatch, NewHabit, NewRitual, Ritual, RitualPatch, TimeOfDay,
};
use crate::model::{EntityId, HabitId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitStore {
    habits: Collection<Habit>,
    rituals: Collection<Ritual>,
    initialized: bool,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn habits(&self) -> &[Habit] {
        self.habits.as_slice()
    }

    pub fn rituals(&self) -> &[Ritual] {
        self.rituals.as_slice()
    }

    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.get(id)
    }

    /// Creates a habit with zeroed streak counters.
    pub fn add_habit(&mut self, habit: NewHabit) -> HabitId {
        self.habits.add(habit)
    }

    pub fn update_habit(&mut self, id: HabitId, patch: HabitPatch) -> bool {
        self.habits.update(id, patch)
    }

    /// Deletes a habit unless a ritual still lists it.
    ///
    /// # Errors
    /// - `StoreError::HabitInUse` naming every referencing ritual.
    pub fn delete_habit(&mut self, id: HabitId) -> StoreResult<bool> {
        let rituals: Vec<String> = self
            .rituals
            .iter()
            .filter(|ritual| ritual.references(id))
            .map(|ritual| ritual.name.clone())
            .collect();
        if !rituals.is_empty() {
            return Err(StoreError::HabitInUse {
                habit_id: id,
                rituals,
            });
        }
        Ok(self.habits.remove(id).is_some())
    }

    /// Flips today's completion; returns the new state or `None` if absent.
    pub fn toggle_habit(&mut self, id: HabitId) -> Option<bool> {
        self.habits.get_mut(id).map(Habit::toggle_completion)
    }

    /// Stores a ritual as given; listed habit ids are not checked.
    pub fn add_ritual(&mut self, ritual: NewRitual) -> EntityId {
        self.rituals.add(ritual)
    }

    pub fn update_ritual(&mut self, id: EntityId, patch: RitualPatch) -> bool {
        self.rituals.update(id, patch)
    }

    pub fn delete_ritual(&mut self, id: EntityId) -> bool {
        self.rituals.remove(id).is_some()
    }

    pub fn toggle_ritual(&mut self, id: EntityId) -> Option<bool> {
        let ritual = self.rituals.get_mut(id)?;
        ritual.completed_today = !ritual.completed_today;
        Some(ritual.completed_today)
    }

    /// Appends `habit_id` to a ritual; returns `false` if the ritual is
    /// missing or already lists the habit.
    pub fn add_habit_to_ritual(&mut self, ritual_id: EntityId, habit_id: HabitId) -> bool {
        match self.rituals.get_mut(ritual_id) {
            Some(ritual) if !ritual.references(habit_id) => {
                ritual.habits.push(habit_id);
                true
            }
            _ => false,
        }
    }

    pub fn remove_habit_from_ritual(&mut self, ritual_id: EntityId, habit_id: HabitId) -> bool {
        let Some(ritual) = self.rituals.get_mut(ritual_id) else {
            return false;
        };
        let before = ritual.habits.len();
        ritual.habits.retain(|listed| *listed != habit_id);
        ritual.habits.len() != before
    }

    /// Closes the day: clears completion flags and breaks missed streaks.
    pub fn start_new_day(&mut self) {
        for habit in self.habits.iter_mut() {
            habit.roll_over_day();
        }
        for ritual in self.rituals.iter_mut() {
            ritual.completed_today = false;
        }
    }
}

impl DomainStore for HabitStore {
    const SLOT_KEY: &'static str = "habit-store";

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn seed_defaults(&mut self) {
        if self.habits.is_empty() {
            let defaults = [
                ("Morning meditation", "mindfulness", Difficulty::Easy),
                ("Drink 2L of water", "health", Difficulty::Easy),
                ("Read 20 pages", "learning", Difficulty::Medium),
                ("Workout", "fitness", Difficulty::Hard),
            ];
            for (name, category, difficulty) in defaults {
                self.habits.add(NewHabit {
                    name: name.to_string(),
                    category: category.to_string(),
                    frequency: Frequency::Daily,
                    difficulty,
                });
            }
        }

        if self.rituals.is_empty() {
            let morning: Vec<HabitId> = self.habits.iter().take(2).map(|h| h.id).collect();
            self.rituals.add(NewRitual {
                name: "Morning Routine".to_string(),
                time_of_day: TimeOfDay::Morning,
                habits: morning,
                is_active: true,
            });
        }
    }
}

impl Record for Habit {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewHabit {
    type Record = Habit;

    fn into_record(self, id: EntityId) -> Habit {
        Habit {
            id,
            name: self.name,
            category: self.category,
            frequency: self.frequency,
            streak: 0,
            longest_streak: 0,
            completed_today: false,
            total_completions: 0,
            created_at: Utc::now(),
            difficulty: self.difficulty,
        }
    }
}

impl Patch<Habit> for HabitPatch {
    fn apply_to(self, target: &mut Habit) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(frequency) = self.frequency {
            target.frequency = frequency;
        }
        if let Some(difficulty) = self.difficulty {
            target.difficulty = difficulty;
        }
    }
}

impl Record for Ritual {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewRitual {
    type Record = Ritual;

    fn into_record(self, id: EntityId) -> Ritual {
        Ritual {
            id,
            name: self.name,
            time_of_day: self.time_of_day,
            habits: self.habits,
            is_active: self.is_active,
            completed_today: false,
        }
    }
}

impl Patch<Ritual> for RitualPatch {
    fn apply_to(self, target: &mut Ritual) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(time_of_day) = self.time_of_day {
            target.time_of_day = time_of_day;
        }
        if let Some(habits) = self.habits {
            target.habits = habits;
        }
        if let Some(is_active) = self.is_active {
            target.is_active = is_active;
        }
    }
}
