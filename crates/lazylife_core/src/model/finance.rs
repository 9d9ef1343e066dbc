//! Finance records: categories, transactions, debts and portfolios.
//!
//! # Invariants
//! - `Transaction::category_id` references a `Category` by id only.
//! - `0 <= remaining_amount <= total_amount` is intended for debts but not
//!   enforced; numeric fields are accepted as given.

use super::{CategoryId, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub kind: TransactionType,
    /// Display color, e.g. `#22c55e`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionType,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub kind: Option<TransactionType>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub date: NaiveDate,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub kind: TransactionType,
    pub amount: f64,
    pub date: NaiveDate,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    StudentLoan,
    Mortgage,
    PersonalLoan,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DebtType,
    pub total_amount: f64,
    pub remaining_amount: f64,
    /// Annual percentage rate, e.g. `20.0` for 20%.
    pub interest_rate: f64,
    pub minimum_payment: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub kind: DebtType,
    pub total_amount: f64,
    pub remaining_amount: f64,
    pub interest_rate: f64,
    pub minimum_payment: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub kind: Option<DebtType>,
    pub total_amount: Option<f64>,
    pub remaining_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub minimum_payment: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    Stock,
    Bond,
    Etf,
    MutualFund,
    Crypto,
    RealEstate,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

impl Investment {
    /// Current market value of the position.
    pub fn value(&self) -> f64 {
        self.quantity * self.current_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub name: String,
    pub kind: InvestmentType,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentPatch {
    pub name: Option<String>,
    pub kind: Option<InvestmentType>,
    pub quantity: Option<f64>,
    pub purchase_price: Option<f64>,
    pub current_price: Option<f64>,
}

/// Named, ordered group of investments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: EntityId,
    pub name: String,
    pub investments: Vec<Investment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPortfolio {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioPatch {
    pub name: Option<String>,
}
