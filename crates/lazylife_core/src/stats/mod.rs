//! Derived statistics.
//!
//! # Responsibility
//! - Compute dashboard figures from the current store contents.
//!
//! # Invariants
//! - Every function is pure and recomputes from scratch; nothing is cached
//!   or persisted.
//! - Empty inputs yield 0 rather than NaN.

pub mod finance;
pub mod habits;
pub mod productivity;

use crate::model::vision::GoalStatus;
use crate::store::{FinanceStore, HabitStore, IdentityStore, ProductivityStore, VisionStore};
use chrono::NaiveDate;

pub use finance::{
    cash_flow, debt_summary, portfolio_gain, portfolio_value, spending_by_category,
    total_portfolio_value, CashFlow, DebtSummary,
};
pub use habits::{
    best_current_streak, completed_today, completion_rate, goal_progress, goal_status_counts,
    habit_completion_rate, ritual_progress, GoalStatusCounts,
};
pub use productivity::{
    average_trait_gap, focus_hours_on, productivity_score, ProductivityInputs,
};

/// One snapshot of every headline figure on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub debts: DebtSummary,
    pub cash_flow: CashFlow,
    pub portfolio_value: f64,
    pub habits_completed_today: usize,
    pub habit_count: usize,
    pub best_streak: u32,
    pub goals: GoalStatusCounts,
    pub focus_hours_today: f64,
    pub average_trait_gap: f64,
    pub productivity_score: u32,
}

impl DashboardSummary {
    /// Computes the summary for `today` from borrowed store snapshots.
    pub fn compute(
        finance: &FinanceStore,
        habits: &HabitStore,
        vision: &VisionStore,
        identity: &IdentityStore,
        productivity: &ProductivityStore,
        today: NaiveDate,
    ) -> Self {
        let focus_hours_today = focus_hours_on(productivity.focus_sessions(), today);
        let best_streak = best_current_streak(habits.habits());
        let inputs = ProductivityInputs {
            focus_hours_today,
            active_habits: habits.habits().len(),
            habit_streak: best_streak,
            active_goals: active_goals(vision),
        };

        Self {
            debts: debt_summary(finance.debts()),
            cash_flow: cash_flow(finance.transactions()),
            portfolio_value: total_portfolio_value(finance.portfolios()),
            habits_completed_today: completed_today(habits.habits()),
            habit_count: habits.habits().len(),
            best_streak,
            goals: goal_status_counts(vision.goals()),
            focus_hours_today,
            average_trait_gap: average_trait_gap(identity.character_traits()),
            productivity_score: productivity_score(&inputs),
        }
    }
}

/// Goals currently in progress.
pub fn active_goals(vision: &VisionStore) -> usize {
    vision
        .goals()
        .iter()
        .filter(|goal| goal.status == GoalStatus::InProgress)
        .count()
}

#[cfg(test)]
mod tests {
    use super::{
        completion_rate, debt_summary, focus_hours_on, productivity_score, ritual_progress,
        spending_by_category, ProductivityInputs,
    };
    use crate::model::finance::{DebtType, NewDebt, NewTransaction, TransactionType};
    use crate::model::habit::{Difficulty, Frequency, NewHabit, NewRitual, TimeOfDay};
    use crate::model::productivity::NewFocusSession;
    use crate::store::{FinanceStore, HabitStore, ProductivityStore};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn empty_debts_have_zero_average() {
        let summary = debt_summary(&[]);
        assert_eq!(summary.average_interest_rate, 0.0);
        assert_eq!(summary.total_debt, 0.0);
    }

    #[test]
    fn debt_summary_sums_and_averages() {
        let mut store = FinanceStore::new();
        for (remaining, rate, minimum) in [(800.0, 20.0, 50.0), (200.0, 10.0, 25.0)] {
            store.add_debt(NewDebt {
                name: "debt".to_string(),
                kind: DebtType::Other,
                total_amount: 1000.0,
                remaining_amount: remaining,
                interest_rate: rate,
                minimum_payment: minimum,
                due_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
            });
        }
        let summary = debt_summary(store.debts());
        assert_eq!(summary.total_debt, 1000.0);
        assert_eq!(summary.monthly_payments, 75.0);
        assert_eq!(summary.average_interest_rate, 15.0);
    }

    #[test]
    fn completion_rate_rounds_and_guards_zero_target() {
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(30, 30), 100);
        assert_eq!(completion_rate(5, 0), 0);
    }

    #[test]
    fn productivity_score_weights_each_input() {
        assert_eq!(productivity_score(&ProductivityInputs::default()), 0);

        let full = ProductivityInputs {
            focus_hours_today: 8.0,
            active_habits: 5,
            habit_streak: 7,
            active_goals: 3,
        };
        assert_eq!(productivity_score(&full), 100);

        let focus_only = ProductivityInputs {
            focus_hours_today: 4.0,
            ..ProductivityInputs::default()
        };
        assert_eq!(productivity_score(&focus_only), 20);

        let goal_only = ProductivityInputs {
            active_goals: 1,
            ..ProductivityInputs::default()
        };
        assert_eq!(productivity_score(&goal_only), 3);
    }

    #[test]
    fn focus_hours_count_only_sessions_started_that_day() {
        let mut store = ProductivityStore::new();
        let day = NaiveDate::from_ymd_opt(2025, 5, 2).expect("date");
        for (hour, minutes) in [(9, 50), (14, 40)] {
            store.log_focus_session(NewFocusSession {
                label: "deep work".to_string(),
                started_at: Utc.with_ymd_and_hms(2025, 5, 2, hour, 0, 0).unwrap(),
                duration_minutes: minutes,
            });
        }
        store.log_focus_session(NewFocusSession {
            label: "yesterday".to_string(),
            started_at: Utc.with_ymd_and_hms(2025, 5, 1, 22, 0, 0).unwrap(),
            duration_minutes: 120,
        });

        assert_eq!(focus_hours_on(store.focus_sessions(), day), 1.5);
    }

    #[test]
    fn ritual_progress_ignores_dangling_habits() {
        let mut store = HabitStore::new();
        let done = store.add_habit(NewHabit {
            name: "Stretch".to_string(),
            category: "fitness".to_string(),
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
        });
        let open = store.add_habit(NewHabit {
            name: "Plan day".to_string(),
            category: "focus".to_string(),
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
        });
        store.toggle_habit(done);
        store.add_ritual(NewRitual {
            name: "Morning".to_string(),
            time_of_day: TimeOfDay::Morning,
            habits: vec![done, open, Uuid::new_v4()],
            is_active: true,
        });

        assert_eq!(ritual_progress(&store.rituals()[0], store.habits()), 50);
    }

    #[test]
    fn spending_groups_expenses_by_category() {
        let mut store = FinanceStore::new();
        let food = Uuid::new_v4();
        let rent = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).expect("date");
        for (kind, amount, category_id) in [
            (TransactionType::Expense, 30.0, food),
            (TransactionType::Expense, 900.0, rent),
            (TransactionType::Income, 3000.0, food),
            (TransactionType::Expense, 12.5, food),
        ] {
            store.add_transaction(NewTransaction {
                description: "entry".to_string(),
                kind,
                amount,
                date,
                category_id,
            });
        }

        assert_eq!(
            spending_by_category(store.transactions()),
            vec![(food, 42.5), (rent, 900.0)]
        );
    }
}
