// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::error::StateError;
use smartspend::models::{
    Currency, Frequency, RecurringTransactionRule, TransactionDraft, TransactionType, UserProfile,
};
use smartspend::state::{AppState, new_id};
use smartspend::{cli, commands::budgets};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(date: &str, amount: i64, category: &str) -> TransactionDraft {
    TransactionDraft {
        date: d(date),
        amount: Decimal::from(amount),
        category: category.into(),
        description: category.into(),
        kind: TransactionType::Expense,
        is_recurring: false,
    }
}

#[test]
fn defaults_are_usd_and_builtin_categories() {
    let state = AppState::default();
    assert_eq!(state.currency().code, "USD");
    assert_eq!(state.currency().symbol, "$");
    assert!(state.categories.iter().any(|c| c == "Other"));
    assert!(state.transactions.is_empty());
    assert!(state.profile.is_none());
}

#[test]
fn setting_a_budget_twice_replaces_it() {
    let mut state = AppState::default();
    state.set_budget("Food", Decimal::from(200)).unwrap();
    state.set_budget("food", Decimal::from(350)).unwrap();
    assert_eq!(state.budgets.len(), 1);
    assert_eq!(state.budgets[0].category, "Food");
    assert_eq!(state.budgets[0].limit, Decimal::from(350));

    assert_eq!(
        state.set_budget("Nope", Decimal::ONE).unwrap_err(),
        StateError::UnknownCategory("Nope".into())
    );
}

#[test]
fn budget_status_counts_only_that_months_expenses() {
    let mut state = AppState::default();
    state.set_budget("Food", Decimal::from(100)).unwrap();
    state.add_transaction(draft("2025-03-02", 30, "Food")).unwrap();
    state.add_transaction(draft("2025-03-20", 90, "Food")).unwrap();
    state.add_transaction(draft("2025-02-27", 500, "Food")).unwrap();
    state.add_transaction(draft("2025-03-05", 70, "Transport")).unwrap();

    let status = state.budget_status("2025-03");
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].spent, Decimal::from(120));
    assert_eq!(status[0].remaining, Decimal::from(-20));
}

#[test]
fn budget_cli_set_and_remove() {
    let mut state = AppState::default();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "budget", "set", "--category", "Health", "--limit", "80",
    ]);
    let (_, budget_m) = matches.subcommand().unwrap();
    budgets::handle(&mut state, budget_m).unwrap();
    assert_eq!(state.budgets[0].limit, Decimal::from(80));

    let matches = cli::build_cli().get_matches_from(["smartspend", "budget", "rm", "--category", "health"]);
    let (_, budget_m) = matches.subcommand().unwrap();
    budgets::handle(&mut state, budget_m).unwrap();
    assert!(state.budgets.is_empty());
}

#[test]
fn removing_a_category_leaves_transactions_alone() {
    let mut state = AppState::default();
    state.add_transaction(draft("2025-01-01", 5, "Food")).unwrap();
    assert!(state.remove_category("Food"));
    assert!(!state.remove_category("Food"));
    assert_eq!(state.transactions[0].category, "Food");
    assert_eq!(
        state.add_transaction(draft("2025-01-02", 5, "Food")).unwrap_err(),
        StateError::UnknownCategory("Food".into())
    );
}

#[test]
fn adding_categories_ignores_blanks_and_duplicates() {
    let mut state = AppState::default();
    let before = state.categories.len();
    assert!(state.add_category("  Pets "));
    assert!(!state.add_category("pets"));
    assert!(!state.add_category("   "));
    assert_eq!(state.categories.len(), before + 1);
    assert_eq!(state.categories.last().unwrap(), "Pets");
}

#[test]
fn negative_amounts_are_rejected() {
    let mut state = AppState::default();
    let err = state.add_transaction(draft("2025-01-01", -5, "Food")).unwrap_err();
    assert!(matches!(err, StateError::NegativeAmount(_)));
    assert!(state.add_transaction(draft("2025-01-01", 0, "Food")).is_ok());
}

#[test]
fn edit_and_delete_unknown_ids() {
    let mut state = AppState::default();
    assert_eq!(
        state.edit_transaction("x", draft("2025-01-01", 1, "Food")).unwrap_err(),
        StateError::TransactionNotFound("x".into())
    );
    assert!(state.delete_transaction("x").is_err());
}

#[test]
fn currencies_can_be_switched_and_extended() {
    let mut state = AppState::default();
    assert_eq!(state.set_currency("eur").unwrap().symbol, "€");
    assert_eq!(state.currency_code, "EUR");
    assert!(state.set_currency("XYZ").is_err());

    state
        .add_custom_currency(Currency {
            code: "btc".into(),
            name: "Bitcoin".into(),
            symbol: "₿".into(),
        })
        .unwrap();
    assert_eq!(state.set_currency("BTC").unwrap().name, "Bitcoin");
    assert!(matches!(
        state.add_custom_currency(Currency {
            code: "usd".into(),
            name: "Dup".into(),
            symbol: "$".into(),
        }),
        Err(StateError::DuplicateCurrency(_))
    ));
}

#[test]
fn stale_currency_code_resolves_to_first_builtin() {
    let state = AppState {
        currency_code: "GONE".into(),
        ..AppState::default()
    };
    assert_eq!(state.currency().code, "USD");
}

#[test]
fn recurring_rules_are_stored_not_executed() {
    let mut state = AppState::default();
    let id = new_id();
    state
        .add_recurring_rule(RecurringTransactionRule {
            id: id.clone(),
            template: TransactionDraft {
                is_recurring: true,
                ..draft("2025-01-01", 1200, "Housing")
            },
            frequency: Frequency::Monthly,
            last_executed_date: None,
        })
        .unwrap();
    assert_eq!(state.recurring.len(), 1);
    assert!(state.transactions.is_empty());
    assert_eq!(state.remove_recurring_rule(&id).unwrap().frequency, Frequency::Monthly);
    assert!(state.remove_recurring_rule(&id).is_err());
}

#[test]
fn recurring_rule_keeps_the_registered_category_spelling() {
    let mut state = AppState::default();
    let rule = state
        .add_recurring_rule(RecurringTransactionRule {
            id: new_id(),
            template: draft("2025-01-01", 15, "utilities"),
            frequency: Frequency::Weekly,
            last_executed_date: None,
        })
        .unwrap();
    assert_eq!(rule.template.category, "Utilities");
}

#[test]
fn streak_grows_on_consecutive_days_and_resets_after_gap() {
    let mut state = AppState::default();
    state.record_activity(d("2025-03-01"));
    assert!(state.profile.is_none());

    state.login(UserProfile::guest());
    state.record_activity(d("2025-03-01"));
    state.record_activity(d("2025-03-01"));
    assert_eq!(state.profile.as_ref().unwrap().streak, 1);
    for day in 2..=7 {
        state.record_activity(d(&format!("2025-03-{:02}", day)));
    }
    let p = state.profile.as_ref().unwrap();
    assert_eq!(p.streak, 7);
    assert_eq!(p.level(), 2);

    state.record_activity(d("2025-03-10"));
    assert_eq!(state.profile.as_ref().unwrap().streak, 1);

    assert!(state.logout().is_some());
    assert!(state.profile.is_none());
}
