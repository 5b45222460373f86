// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections from [`crate::state::AppState`] operations.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),
    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),
    #[error("Recurring rule '{0}' not found")]
    RuleNotFound(String),
    #[error("No budget set for category '{0}'")]
    BudgetNotFound(String),
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(String),
    #[error("Currency '{0}' is not known")]
    UnknownCurrency(String),
    #[error("Currency '{0}' already exists")]
    DuplicateCurrency(String),
}

/// Failures while reading or writing external files.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid backup snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("Transaction '{id}' has a negative amount ({amount})")]
    NegativeAmount { id: String, amount: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to, or understanding, the generative-AI provider.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("AI response could not be understood: {0}")]
    ParseFailure(String),
    #[error("Missing AI credential; set {0}")]
    MissingApiKey(&'static str),
    #[error("Unsupported receipt file: {0}")]
    UnsupportedReceipt(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
