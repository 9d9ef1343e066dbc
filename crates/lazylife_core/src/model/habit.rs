//! Habit and ritual records.
//!
//! # Invariants
//! - `longest_streak >= streak` at all times.
//! - `Ritual::habits` holds non-owning `HabitId` references in display order.

use super::{EntityId, HabitId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub category: String,
    pub frequency: Frequency,
    pub streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
    pub total_completions: u32,
    pub created_at: DateTime<Utc>,
    pub difficulty: Difficulty,
}

impl Habit {
    /// Flips today's completion and moves the streak with it.
    ///
    /// Returns the new `completed_today` value.
    pub fn toggle_completion(&mut self) -> bool {
        if self.completed_today {
            self.completed_today = false;
            self.streak = self.streak.saturating_sub(1);
            self.total_completions = self.total_completions.saturating_sub(1);
        } else {
            self.completed_today = true;
            self.streak += 1;
            self.total_completions += 1;
            self.longest_streak = self.longest_streak.max(self.streak);
        }
        self.completed_today
    }

    /// Closes the current day: a missed day breaks the streak.
    pub fn roll_over_day(&mut self) {
        if !self.completed_today {
            self.streak = 0;
        }
        self.completed_today = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub category: String,
    pub frequency: Frequency,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Ordered routine built from existing habits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ritual {
    pub id: EntityId,
    pub name: String,
    pub time_of_day: TimeOfDay,
    pub habits: Vec<HabitId>,
    pub is_active: bool,
    pub completed_today: bool,
}

impl Ritual {
    pub fn references(&self, habit_id: HabitId) -> bool {
        self.habits.contains(&habit_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRitual {
    pub name: String,
    pub time_of_day: TimeOfDay,
    pub habits: Vec<HabitId>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RitualPatch {
    pub name: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
    pub habits: Option<Vec<HabitId>>,
    pub is_active: Option<bool>,
}
