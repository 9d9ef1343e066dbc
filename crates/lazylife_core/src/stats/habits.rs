//! Habit, ritual and goal statistics.

use crate::model::habit::{Habit, Ritual};
use crate::model::vision::{Goal, GoalStatus};

/// `round(total_completions / target_days × 100)`; 0 for a zero target.
pub fn completion_rate(total_completions: u32, target_days: u32) -> u32 {
    if target_days == 0 {
        return 0;
    }
    (f64::from(total_completions) / f64::from(target_days) * 100.0).round() as u32
}

pub fn habit_completion_rate(habit: &Habit, target_days: u32) -> u32 {
    completion_rate(habit.total_completions, target_days)
}

/// Highest current streak across habits.
pub fn best_current_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|habit| habit.streak).max().unwrap_or(0)
}

pub fn completed_today(habits: &[Habit]) -> usize {
    habits.iter().filter(|habit| habit.completed_today).count()
}

/// Share (0-100) of a ritual's resolvable habits completed today.
///
/// Dangling habit ids are ignored; an empty ritual scores 0.
pub fn ritual_progress(ritual: &Ritual, habits: &[Habit]) -> u32 {
    let listed: Vec<&Habit> = ritual
        .habits
        .iter()
        .filter_map(|id| habits.iter().find(|habit| habit.id == *id))
        .collect();
    if listed.is_empty() {
        return 0;
    }
    let done = listed.iter().filter(|habit| habit.completed_today).count();
    (done as f64 / listed.len() as f64 * 100.0).round() as u32
}

/// Completed milestones as a rounded percentage; 0 without milestones.
pub fn goal_progress(goal: &Goal) -> u32 {
    if goal.milestones.is_empty() {
        return 0;
    }
    let done = goal.milestones.iter().filter(|m| m.completed).count();
    (done as f64 / goal.milestones.len() as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalStatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn goal_status_counts(goals: &[Goal]) -> GoalStatusCounts {
    let mut counts = GoalStatusCounts::default();
    for goal in goals {
        match goal.status {
            GoalStatus::NotStarted => counts.not_started += 1,
            GoalStatus::InProgress => counts.in_progress += 1,
            GoalStatus::Completed => counts.completed += 1,
        }
    }
    counts
}
