// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The whole application state as one explicit value. Commands load it from
//! the store, run one operation and write it back.

use crate::aggregate::{month_key, sum_amounts};
use crate::ai::ToolCall;
use crate::error::StateError;
use crate::models::{
    Budget, Currency, RecurringTransactionRule, Transaction, TransactionDraft, UserProfile,
};
use crate::registry::{self, DEFAULT_CURRENCY};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub recurring: Vec<RecurringTransactionRule>,
    pub categories: Vec<String>,
    pub currency_code: String,
    pub custom_currencies: Vec<Currency>,
    pub profile: Option<UserProfile>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            recurring: Vec::new(),
            categories: registry::default_categories(),
            currency_code: DEFAULT_CURRENCY.to_string(),
            custom_currencies: Vec::new(),
            profile: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppliedAction {
    TransactionAdded(Transaction),
    BudgetSet(Budget),
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl AppState {
    pub fn currency(&self) -> &Currency {
        registry::resolve_currency(&self.custom_currencies, &self.currency_code)
    }

    fn validate_draft(&self, draft: &TransactionDraft) -> Result<(), StateError> {
        if draft.amount.is_sign_negative() && !draft.amount.is_zero() {
            return Err(StateError::NegativeAmount(draft.amount.to_string()));
        }
        if registry::find_category(&self.categories, &draft.category).is_none() {
            return Err(StateError::UnknownCategory(draft.category.clone()));
        }
        Ok(())
    }

    /// Records a new transaction at the front of the collection.
    pub fn add_transaction(&mut self, mut draft: TransactionDraft) -> Result<&Transaction, StateError> {
        self.validate_draft(&draft)?;
        if let Some(canonical) = registry::find_category(&self.categories, &draft.category) {
            draft.category = canonical.to_string();
        }
        let tx = Transaction::from_draft(new_id(), draft);
        tracing::info!(id = %tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        self.transactions.insert(0, tx);
        Ok(&self.transactions[0])
    }

    /// Replaces every field except the id. The category is validated only
    /// when it changes, so edits keep working on orphaned categories.
    pub fn edit_transaction(&mut self, id: &str, mut draft: TransactionDraft) -> Result<&Transaction, StateError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StateError::TransactionNotFound(id.to_string()))?;
        if draft.amount.is_sign_negative() && !draft.amount.is_zero() {
            return Err(StateError::NegativeAmount(draft.amount.to_string()));
        }
        if draft.category != self.transactions[pos].category {
            match registry::find_category(&self.categories, &draft.category) {
                Some(canonical) => draft.category = canonical.to_string(),
                None => return Err(StateError::UnknownCategory(draft.category)),
            }
        }
        self.transactions[pos] = Transaction::from_draft(id.to_string(), draft);
        Ok(&self.transactions[pos])
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, StateError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StateError::TransactionNotFound(id.to_string()))?;
        Ok(self.transactions.remove(pos))
    }

    /// Imported rows go in front of the existing ones; nothing is merged.
    pub fn import_transactions(&mut self, imported: Vec<Transaction>) -> usize {
        let n = imported.len();
        self.transactions.splice(0..0, imported);
        n
    }

    pub fn restore_transactions(&mut self, snapshot: Vec<Transaction>) {
        self.transactions = snapshot;
    }

    pub fn set_budget(&mut self, category: &str, limit: Decimal) -> Result<&Budget, StateError> {
        if limit.is_sign_negative() && !limit.is_zero() {
            return Err(StateError::NegativeAmount(limit.to_string()));
        }
        let category = registry::find_category(&self.categories, category)
            .ok_or_else(|| StateError::UnknownCategory(category.to_string()))?
            .to_string();
        let pos = match self.budgets.iter().position(|b| b.category == category) {
            Some(pos) => {
                self.budgets[pos].limit = limit;
                pos
            }
            None => {
                self.budgets.push(Budget { category, limit });
                self.budgets.len() - 1
            }
        };
        Ok(&self.budgets[pos])
    }

    pub fn remove_budget(&mut self, category: &str) -> Result<Budget, StateError> {
        let pos = self
            .budgets
            .iter()
            .position(|b| b.category.eq_ignore_ascii_case(category.trim()))
            .ok_or_else(|| StateError::BudgetNotFound(category.to_string()))?;
        Ok(self.budgets.remove(pos))
    }

    /// Spending against every budget for one `YYYY-MM` month.
    pub fn budget_status(&self, month: &str) -> Vec<BudgetStatus> {
        self.budgets
            .iter()
            .map(|b| {
                let spent = sum_amounts(
                    self.transactions
                        .iter()
                        .filter(|t| t.is_expense() && t.category == b.category && month_key(t.date) == month)
                        .map(|t| t.amount),
                );
                BudgetStatus {
                    category: b.category.clone(),
                    limit: b.limit,
                    spent,
                    remaining: b.limit - spent,
                }
            })
            .collect()
    }

    /// Returns false when the name is blank or already present.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || registry::find_category(&self.categories, name).is_some() {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    /// Existing transactions keep the removed label.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| !c.eq_ignore_ascii_case(name.trim()));
        before != self.categories.len()
    }

    pub fn set_currency(&mut self, code: &str) -> Result<&Currency, StateError> {
        let found = registry::find_currency(&self.custom_currencies, code)
            .ok_or_else(|| StateError::UnknownCurrency(code.to_string()))?;
        self.currency_code = found.code.clone();
        Ok(self.currency())
    }

    pub fn add_custom_currency(&mut self, mut currency: Currency) -> Result<(), StateError> {
        currency.code = currency.code.trim().to_uppercase();
        if registry::find_currency(&self.custom_currencies, &currency.code).is_some() {
            return Err(StateError::DuplicateCurrency(currency.code));
        }
        self.custom_currencies.push(currency);
        Ok(())
    }

    pub fn add_recurring_rule(&mut self, mut rule: RecurringTransactionRule) -> Result<&RecurringTransactionRule, StateError> {
        self.validate_draft(&rule.template)?;
        if let Some(canonical) = registry::find_category(&self.categories, &rule.template.category) {
            rule.template.category = canonical.to_string();
        }
        self.recurring.push(rule);
        Ok(&self.recurring[self.recurring.len() - 1])
    }

    pub fn remove_recurring_rule(&mut self, id: &str) -> Result<RecurringTransactionRule, StateError> {
        let pos = self
            .recurring
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StateError::RuleNotFound(id.to_string()))?;
        Ok(self.recurring.remove(pos))
    }

    pub fn login(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn logout(&mut self) -> Option<UserProfile> {
        self.profile.take()
    }

    /// Extends the streak on consecutive days and restarts it after a gap.
    pub fn record_activity(&mut self, today: NaiveDate) {
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        match profile.last_active {
            Some(last) if last == today => return,
            Some(last) if last + Duration::days(1) == today => profile.streak += 1,
            _ => profile.streak = 1,
        }
        profile.last_active = Some(today);
    }

    /// Executes an action requested by the assistant through the same paths
    /// as manual input.
    pub fn apply_tool_call(&mut self, call: ToolCall) -> Result<AppliedAction, StateError> {
        match call {
            ToolCall::AddTransaction(draft) => {
                let tx = self.add_transaction(draft)?.clone();
                Ok(AppliedAction::TransactionAdded(tx))
            }
            ToolCall::SetBudget { category, limit } => {
                let budget = self.set_budget(&category, limit)?.clone();
                Ok(AppliedAction::BudgetSet(budget))
            }
        }
    }
}
