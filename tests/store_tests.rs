// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Connection;
use smartspend::db::{self, KEY_BUDGETS, KEY_CURRENCY, KEY_TRANSACTIONS, KEY_USER};
use smartspend::models::{TransactionDraft, TransactionType, UserProfile};
use smartspend::state::AppState;

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn populated() -> AppState {
    let mut state = AppState::default();
    state
        .add_transaction(TransactionDraft {
            date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            amount: Decimal::new(1999, 2),
            category: "Shopping".into(),
            description: "Socks".into(),
            kind: TransactionType::Expense,
            is_recurring: false,
        })
        .unwrap();
    state.set_budget("Shopping", Decimal::from(100)).unwrap();
    state.add_category("Pets");
    state.set_currency("GBP").unwrap();
    state.login(UserProfile::guest());
    state
}

#[test]
fn empty_store_loads_defaults() {
    let conn = conn();
    assert_eq!(db::load_state(&conn), AppState::default());
}

#[test]
fn state_round_trips_through_the_store() {
    let mut conn = conn();
    let state = populated();
    db::save_state(&mut conn, &state).unwrap();
    assert_eq!(db::load_state(&conn), state);
    // the currency code is stored as a bare string
    assert_eq!(db::get_value(&conn, KEY_CURRENCY).unwrap().as_deref(), Some("GBP"));
}

#[test]
fn corrupt_entry_only_resets_its_own_key() {
    let mut conn = conn();
    let state = populated();
    db::save_state(&mut conn, &state).unwrap();
    db::set_value(&conn, KEY_TRANSACTIONS, "{not json").unwrap();

    let loaded = db::load_state(&conn);
    assert!(loaded.transactions.is_empty());
    assert_eq!(loaded.budgets, state.budgets);
    assert_eq!(loaded.currency_code, "GBP");
}

#[test]
fn wrong_shape_falls_back_too() {
    let conn = conn();
    db::set_value(&conn, KEY_BUDGETS, r#"{"category":"Food"}"#).unwrap();
    assert!(db::load_state(&conn).budgets.is_empty());
}

#[test]
fn logging_out_removes_the_stored_profile() {
    let mut conn = conn();
    let mut state = populated();
    db::save_state(&mut conn, &state).unwrap();
    assert!(db::get_value(&conn, KEY_USER).unwrap().is_some());

    state.logout();
    db::save_state(&mut conn, &state).unwrap();
    assert!(db::get_value(&conn, KEY_USER).unwrap().is_none());
    assert!(db::load_state(&conn).profile.is_none());
}

#[test]
fn set_value_overwrites() {
    let conn = conn();
    db::set_value(&conn, "k", "1").unwrap();
    db::set_value(&conn, "k", "2").unwrap();
    assert_eq!(db::get_value(&conn, "k").unwrap().as_deref(), Some("2"));
}
