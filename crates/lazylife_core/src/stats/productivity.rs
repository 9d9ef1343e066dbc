//! Focus time and the blended productivity score.

use crate::model::identity::CharacterTrait;
use crate::model::productivity::FocusSession;
use chrono::NaiveDate;

const FOCUS_HOURS_TARGET: f64 = 8.0;
const ACTIVE_HABITS_TARGET: f64 = 5.0;
const STREAK_TARGET: f64 = 7.0;
const ACTIVE_GOALS_TARGET: f64 = 3.0;

const FOCUS_WEIGHT: f64 = 0.40;
const HABITS_WEIGHT: f64 = 0.25;
const STREAK_WEIGHT: f64 = 0.25;
const GOALS_WEIGHT: f64 = 0.10;

/// Raw inputs of [`productivity_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductivityInputs {
    pub focus_hours_today: f64,
    pub active_habits: usize,
    pub habit_streak: u32,
    pub active_goals: usize,
}

impl ProductivityInputs {
    fn is_empty(&self) -> bool {
        self.focus_hours_today == 0.0
            && self.active_habits == 0
            && self.habit_streak == 0
            && self.active_goals == 0
    }
}

/// Weighted blend of focus, habits, streak and goals against daily targets.
///
/// Components are not capped, so over-target days can exceed 100.
/// All-zero inputs score exactly 0.
pub fn productivity_score(inputs: &ProductivityInputs) -> u32 {
    if inputs.is_empty() {
        return 0;
    }
    let focus = inputs.focus_hours_today / FOCUS_HOURS_TARGET * 100.0;
    let habits = inputs.active_habits as f64 / ACTIVE_HABITS_TARGET * 100.0;
    let streak = f64::from(inputs.habit_streak) / STREAK_TARGET * 100.0;
    let goals = inputs.active_goals as f64 / ACTIVE_GOALS_TARGET * 100.0;

    let blended = FOCUS_WEIGHT * focus
        + HABITS_WEIGHT * habits
        + STREAK_WEIGHT * streak
        + GOALS_WEIGHT * goals;
    blended.max(0.0).round() as u32
}

/// Hours of focus sessions started on `day`.
pub fn focus_hours_on(sessions: &[FocusSession], day: NaiveDate) -> f64 {
    let minutes: u32 = sessions
        .iter()
        .filter(|session| session.started_on(day))
        .map(|session| session.duration_minutes)
        .sum();
    f64::from(minutes) / 60.0
}

/// Mean of `target_score - current_score`; 0 without traits.
pub fn average_trait_gap(traits: &[CharacterTrait]) -> f64 {
    if traits.is_empty() {
        return 0.0;
    }
    let gap: i32 = traits
        .iter()
        .map(|t| i32::from(t.target_score) - i32::from(t.current_score))
        .sum();
    f64::from(gap) / traits.len() as f64
}
