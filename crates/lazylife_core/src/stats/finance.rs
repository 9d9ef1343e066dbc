//! Finance statistics over debts, transactions and portfolios.

use crate::model::finance::{Debt, Portfolio, Transaction, TransactionType};
use crate::model::CategoryId;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebtSummary {
    /// Sum of `remaining_amount`.
    pub total_debt: f64,
    /// Sum of `minimum_payment`.
    pub monthly_payments: f64,
    /// Mean `interest_rate`; 0 when there are no debts.
    pub average_interest_rate: f64,
}

pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    if debts.is_empty() {
        return DebtSummary::default();
    }
    let total_debt = debts.iter().map(|debt| debt.remaining_amount).sum();
    let monthly_payments = debts.iter().map(|debt| debt.minimum_payment).sum();
    let rate_sum: f64 = debts.iter().map(|debt| debt.interest_rate).sum();
    DebtSummary {
        total_debt,
        monthly_payments,
        average_interest_rate: rate_sum / debts.len() as f64,
    }
}

/// Σ quantity × current_price over one portfolio.
pub fn portfolio_value(portfolio: &Portfolio) -> f64 {
    portfolio.investments.iter().map(|inv| inv.value()).sum()
}

/// Σ quantity × current_price over every portfolio.
pub fn total_portfolio_value(portfolios: &[Portfolio]) -> f64 {
    portfolios.iter().map(portfolio_value).sum()
}

/// Unrealized gain: current value minus cost basis.
pub fn portfolio_gain(portfolio: &Portfolio) -> f64 {
    portfolio
        .investments
        .iter()
        .map(|inv| inv.quantity * (inv.current_price - inv.purchase_price))
        .sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CashFlow {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`.
    pub net: f64,
}

pub fn cash_flow(transactions: &[Transaction]) -> CashFlow {
    let mut flow = CashFlow::default();
    for transaction in transactions {
        match transaction.kind {
            TransactionType::Income => flow.income += transaction.amount,
            TransactionType::Expense => flow.expenses += transaction.amount,
        }
    }
    flow.net = flow.income - flow.expenses;
    flow
}

/// Expense totals per category, in first-spent order.
///
/// Category ids are grouped as stored; dangling ids still get a bucket.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<(CategoryId, f64)> {
    let mut totals: Vec<(CategoryId, f64)> = Vec::new();
    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        match totals
            .iter_mut()
            .find(|(category_id, _)| *category_id == transaction.category_id)
        {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.category_id, transaction.amount)),
        }
    }
    totals
}
