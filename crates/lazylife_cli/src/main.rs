//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazylife_core` linkage.
//! - Print today's dashboard summary from the configured data directory.

use chrono::Local;
use lazylife_core::{
    core_version, init_logging_from_config, ping, AppContext, CoreConfig, DashboardSummary,
    LogNotifier,
};
use std::process::ExitCode;
use std::rc::Rc;

const USAGE: &str = "usage: lazylife_cli [ping|version|summary]";

fn main() -> ExitCode {
    let command = std::env::args().nth(1);
    match command.as_deref() {
        None | Some("ping") => {
            println!("lazylife_core ping={}", ping());
            println!("lazylife_core version={}", core_version());
            ExitCode::SUCCESS
        }
        Some("version") => {
            println!("{}", core_version());
            ExitCode::SUCCESS
        }
        Some("summary") => match run_summary() {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                eprintln!("error: {message}");
                ExitCode::FAILURE
            }
        },
        Some(other) => {
            eprintln!("unknown command `{other}`\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run_summary() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Err(err) = init_logging_from_config(&config) {
        // Summary still works without a log file.
        eprintln!("warning: logging disabled: {err}");
    }

    let context =
        AppContext::open(&config, Rc::new(LogNotifier)).map_err(|err| err.to_string())?;
    let today = Local::now().date_naive();
    log::info!(
        "event=cli_summary module=cli status=ok data_dir={} day={today}",
        config.data_dir.display()
    );
    print_summary(&context.summary(today));
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    println!("debt.total={:.2}", summary.debts.total_debt);
    println!("debt.monthly_payments={:.2}", summary.debts.monthly_payments);
    println!(
        "debt.average_interest_rate={:.2}",
        summary.debts.average_interest_rate
    );
    println!("cash_flow.income={:.2}", summary.cash_flow.income);
    println!("cash_flow.expenses={:.2}", summary.cash_flow.expenses);
    println!("cash_flow.net={:.2}", summary.cash_flow.net);
    println!("portfolio.value={:.2}", summary.portfolio_value);
    println!(
        "habits.completed_today={}/{}",
        summary.habits_completed_today, summary.habit_count
    );
    println!("habits.best_streak={}", summary.best_streak);
    println!(
        "goals.not_started={} goals.in_progress={} goals.completed={}",
        summary.goals.not_started, summary.goals.in_progress, summary.goals.completed
    );
    println!("focus.hours_today={:.1}", summary.focus_hours_today);
    println!("identity.average_trait_gap={:.1}", summary.average_trait_gap);
    println!("productivity.score={}", summary.productivity_score);
}
