//! Finance store: categories, transactions, debts and portfolios.
//!
//! # Invariants
//! - A category referenced by any transaction cannot be deleted.
//! - Investments are owned by their portfolio and removed with it.

use super::{Collection, DomainStore, Draft, Patch, Record, StoreError, StoreResult};
use crate::model::finance::{
    Category, CategoryPatch, Debt, DebtPatch, Investment, InvestmentPatch, NewCategory, NewDebt,
    NewInvestment, NewPortfolio, NewTransaction, Portfolio, PortfolioPatch, Transaction,
    TransactionPatch, TransactionType,
};
use crate::model::{CategoryId, EntityId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceStore {
    categories: Collection<Category>,
    transactions: Collection<Transaction>,
    debts: Collection<Debt>,
    portfolios: Collection<Portfolio>,
    initialized: bool,
}

impl FinanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_slice()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn debts(&self) -> &[Debt] {
        self.debts.as_slice()
    }

    pub fn portfolios(&self) -> &[Portfolio] {
        self.portfolios.as_slice()
    }

    pub fn add_category(&mut self, category: NewCategory) -> CategoryId {
        self.categories.add(category)
    }

    pub fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> bool {
        self.categories.update(id, patch)
    }

    /// Deletes a category unless a transaction still points at it.
    ///
    /// # Errors
    /// - `StoreError::CategoryInUse` when referenced; nothing is removed.
    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<bool> {
        let transactions = self
            .transactions
            .iter()
            .filter(|transaction| transaction.category_id == id)
            .count();
        if transactions > 0 {
            return Err(StoreError::CategoryInUse {
                category_id: id,
                transactions,
            });
        }
        Ok(self.categories.remove(id).is_some())
    }

    /// Records a transaction. `category_id` is not checked for existence.
    pub fn add_transaction(&mut self, transaction: NewTransaction) -> EntityId {
        self.transactions.add(transaction)
    }

    pub fn update_transaction(&mut self, id: EntityId, patch: TransactionPatch) -> bool {
        self.transactions.update(id, patch)
    }

    pub fn delete_transaction(&mut self, id: EntityId) -> bool {
        self.transactions.remove(id).is_some()
    }

    pub fn add_debt(&mut self, debt: NewDebt) -> EntityId {
        self.debts.add(debt)
    }

    pub fn update_debt(&mut self, id: EntityId, patch: DebtPatch) -> bool {
        self.debts.update(id, patch)
    }

    pub fn delete_debt(&mut self, id: EntityId) -> bool {
        self.debts.remove(id).is_some()
    }

    pub fn add_portfolio(&mut self, portfolio: NewPortfolio) -> EntityId {
        self.portfolios.add(portfolio)
    }

    pub fn update_portfolio(&mut self, id: EntityId, patch: PortfolioPatch) -> bool {
        self.portfolios.update(id, patch)
    }

    pub fn delete_portfolio(&mut self, id: EntityId) -> bool {
        self.portfolios.remove(id).is_some()
    }

    /// Appends an investment to a portfolio.
    ///
    /// Returns `None` when the portfolio does not exist.
    pub fn add_investment_to_portfolio(
        &mut self,
        portfolio_id: EntityId,
        investment: NewInvestment,
    ) -> Option<EntityId> {
        let portfolio = self.portfolios.get_mut(portfolio_id)?;
        let id = fresh_investment_id(portfolio);
        portfolio.investments.push(investment.into_record(id));
        Some(id)
    }

    pub fn update_investment(
        &mut self,
        portfolio_id: EntityId,
        investment_id: EntityId,
        patch: InvestmentPatch,
    ) -> bool {
        let investment = self
            .portfolios
            .get_mut(portfolio_id)
            .and_then(|portfolio| {
                portfolio
                    .investments
                    .iter_mut()
                    .find(|investment| investment.id == investment_id)
            });
        match investment {
            Some(investment) => {
                patch.apply_to(investment);
                true
            }
            None => false,
        }
    }

    pub fn remove_investment_from_portfolio(
        &mut self,
        portfolio_id: EntityId,
        investment_id: EntityId,
    ) -> bool {
        let Some(portfolio) = self.portfolios.get_mut(portfolio_id) else {
            return false;
        };
        let before = portfolio.investments.len();
        portfolio
            .investments
            .retain(|investment| investment.id != investment_id);
        portfolio.investments.len() != before
    }
}

impl DomainStore for FinanceStore {
    const SLOT_KEY: &'static str = "finance-store";

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn seed_defaults(&mut self) {
        if !self.categories.is_empty() {
            return;
        }
        let defaults = [
            ("Salary", TransactionType::Income, "#22c55e"),
            ("Freelance", TransactionType::Income, "#14b8a6"),
            ("Housing", TransactionType::Expense, "#ef4444"),
            ("Groceries", TransactionType::Expense, "#f97316"),
            ("Transport", TransactionType::Expense, "#eab308"),
            ("Entertainment", TransactionType::Expense, "#a855f7"),
        ];
        for (name, kind, color) in defaults {
            self.categories.add(NewCategory {
                name: name.to_string(),
                kind,
                color: color.to_string(),
            });
        }
    }
}

fn fresh_investment_id(portfolio: &Portfolio) -> EntityId {
    loop {
        let candidate = Uuid::new_v4();
        if portfolio
            .investments
            .iter()
            .all(|investment| investment.id != candidate)
        {
            return candidate;
        }
    }
}

impl Record for Category {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewCategory {
    type Record = Category;

    fn into_record(self, id: EntityId) -> Category {
        Category {
            id,
            name: self.name,
            kind: self.kind,
            color: self.color,
        }
    }
}

impl Patch<Category> for CategoryPatch {
    fn apply_to(self, target: &mut Category) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(color) = self.color {
            target.color = color;
        }
    }
}

impl Record for Transaction {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewTransaction {
    type Record = Transaction;

    fn into_record(self, id: EntityId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            kind: self.kind,
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
        }
    }
}

impl Patch<Transaction> for TransactionPatch {
    fn apply_to(self, target: &mut Transaction) {
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(amount) = self.amount {
            target.amount = amount;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(category_id) = self.category_id {
            target.category_id = category_id;
        }
    }
}

impl Record for Debt {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewDebt {
    type Record = Debt;

    fn into_record(self, id: EntityId) -> Debt {
        Debt {
            id,
            name: self.name,
            kind: self.kind,
            total_amount: self.total_amount,
            remaining_amount: self.remaining_amount,
            interest_rate: self.interest_rate,
            minimum_payment: self.minimum_payment,
            due_date: self.due_date,
        }
    }
}

impl Patch<Debt> for DebtPatch {
    fn apply_to(self, target: &mut Debt) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(total_amount) = self.total_amount {
            target.total_amount = total_amount;
        }
        if let Some(remaining_amount) = self.remaining_amount {
            target.remaining_amount = remaining_amount;
        }
        if let Some(interest_rate) = self.interest_rate {
            target.interest_rate = interest_rate;
        }
        if let Some(minimum_payment) = self.minimum_payment {
            target.minimum_payment = minimum_payment;
        }
        if let Some(due_date) = self.due_date {
            target.due_date = due_date;
        }
    }
}

impl Record for Investment {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewInvestment {
    type Record = Investment;

    fn into_record(self, id: EntityId) -> Investment {
        Investment {
            id,
            name: self.name,
            kind: self.kind,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
        }
    }
}

impl Patch<Investment> for InvestmentPatch {
    fn apply_to(self, target: &mut Investment) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(quantity) = self.quantity {
            target.quantity = quantity;
        }
        if let Some(purchase_price) = self.purchase_price {
            target.purchase_price = purchase_price;
        }
        if let Some(current_price) = self.current_price {
            target.current_price = current_price;
        }
    }
}

impl Record for Portfolio {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewPortfolio {
    type Record = Portfolio;

    fn into_record(self, id: EntityId) -> Portfolio {
        Portfolio {
            id,
            name: self.name,
            investments: Vec::new(),
        }
    }
}

impl Patch<Portfolio> for PortfolioPatch {
    fn apply_to(self, target: &mut Portfolio) {
        if let Some(name) = self.name {
            target.name = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FinanceStore;
    use crate::model::finance::{
        InvestmentType, NewCategory, NewInvestment, NewPortfolio, NewTransaction, TransactionType,
    };
    use crate::store::{DomainStore, StoreError};
    use chrono::NaiveDate;

    fn groceries(store: &mut FinanceStore) -> uuid::Uuid {
        store.add_category(NewCategory {
            name: "Groceries".to_string(),
            kind: TransactionType::Expense,
            color: "#f97316".to_string(),
        })
    }

    #[test]
    fn referenced_category_cannot_be_deleted() {
        let mut store = FinanceStore::new();
        let category_id = groceries(&mut store);
        let transaction_id = store.add_transaction(NewTransaction {
            description: "Market".to_string(),
            kind: TransactionType::Expense,
            amount: 42.5,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
            category_id,
        });

        let err = store.delete_category(category_id).expect_err("in use");
        assert_eq!(
            err,
            StoreError::CategoryInUse {
                category_id,
                transactions: 1
            }
        );
        assert_eq!(store.categories().len(), 1);

        assert!(store.delete_transaction(transaction_id));
        assert_eq!(store.delete_category(category_id), Ok(true));
        assert!(store.categories().is_empty());
    }

    #[test]
    fn investments_live_inside_their_portfolio() {
        let mut store = FinanceStore::new();
        let portfolio_id = store.add_portfolio(NewPortfolio {
            name: "Retirement".to_string(),
        });
        let investment = NewInvestment {
            name: "VTI".to_string(),
            kind: InvestmentType::Etf,
            quantity: 3.0,
            purchase_price: 200.0,
            current_price: 250.0,
        };

        assert!(store
            .add_investment_to_portfolio(uuid::Uuid::new_v4(), investment.clone())
            .is_none());
        let investment_id = store
            .add_investment_to_portfolio(portfolio_id, investment)
            .expect("portfolio exists");
        assert_eq!(store.portfolios()[0].investments.len(), 1);

        assert!(store.remove_investment_from_portfolio(portfolio_id, investment_id));
        assert!(!store.remove_investment_from_portfolio(portfolio_id, investment_id));
    }

    #[test]
    fn seeding_only_fills_empty_categories() {
        let mut store = FinanceStore::new();
        store.seed_defaults();
        assert_eq!(store.categories().len(), 6);

        let mut custom = FinanceStore::new();
        groceries(&mut custom);
        custom.seed_defaults();
        assert_eq!(custom.categories().len(), 1);
    }
}
