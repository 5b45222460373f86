// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::AppState;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "SmartSpend", "smartspend"));

pub const DB_PATH_ENV: &str = "SMARTSPEND_DB";

pub const KEY_TRANSACTIONS: &str = "smartspend_transactions";
pub const KEY_BUDGETS: &str = "smartspend_budgets";
pub const KEY_RECURRING: &str = "smartspend_recurring";
pub const KEY_CATEGORIES: &str = "smartspend_categories";
pub const KEY_CURRENCY: &str = "smartspend_currency";
pub const KEY_CUSTOM_CURRENCIES: &str = "smartspend_custom_currencies";
pub const KEY_USER: &str = "smartspend_user";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_PATH_ENV) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("smartspend.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// One row per storage key; values are JSON blobs, except the currency code
/// which is stored bare.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Missing, unreadable or corrupt entries all fall back to `default`.
fn load_json<T: DeserializeOwned>(conn: &Connection, key: &str, default: T) -> T {
    let raw = match get_value(conn, key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored value, using default");
            return default;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is corrupt, using default");
            default
        }
    }
}

fn save_json<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let s = serde_json::to_string(value).with_context(|| format!("Serialize {}", key))?;
    set_value(conn, key, &s)
}

/// Each key is decoded on its own, so one damaged entry never takes the
/// others down with it.
pub fn load_state(conn: &Connection) -> AppState {
    let defaults = AppState::default();
    let currency_code = match get_value(conn, KEY_CURRENCY) {
        Ok(Some(code)) if !code.trim().is_empty() => code,
        Ok(_) => defaults.currency_code.clone(),
        Err(e) => {
            tracing::warn!(key = KEY_CURRENCY, error = %e, "could not read stored value, using default");
            defaults.currency_code.clone()
        }
    };
    AppState {
        transactions: load_json(conn, KEY_TRANSACTIONS, defaults.transactions),
        budgets: load_json(conn, KEY_BUDGETS, defaults.budgets),
        recurring: load_json(conn, KEY_RECURRING, defaults.recurring),
        categories: load_json(conn, KEY_CATEGORIES, defaults.categories),
        currency_code,
        custom_currencies: load_json(conn, KEY_CUSTOM_CURRENCIES, defaults.custom_currencies),
        profile: load_json(conn, KEY_USER, defaults.profile),
    }
}

pub fn save_state(conn: &mut Connection, state: &AppState) -> Result<()> {
    let tx = conn.transaction()?;
    save_json(&tx, KEY_TRANSACTIONS, &state.transactions)?;
    save_json(&tx, KEY_BUDGETS, &state.budgets)?;
    save_json(&tx, KEY_RECURRING, &state.recurring)?;
    save_json(&tx, KEY_CATEGORIES, &state.categories)?;
    set_value(&tx, KEY_CURRENCY, &state.currency_code)?;
    save_json(&tx, KEY_CUSTOM_CURRENCIES, &state.custom_currencies)?;
    match &state.profile {
        Some(profile) => save_json(&tx, KEY_USER, profile)?,
        None => {
            tx.execute("DELETE FROM kv WHERE key=?1", params![KEY_USER])?;
        }
    }
    tx.commit()?;
    Ok(())
}
