// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Moving the transaction collection in and out of files: CSV for
//! spreadsheets, a JSON snapshot for backups.

use crate::error::CodecError;
use crate::models::{Transaction, TransactionType};
use crate::registry::FALLBACK_CATEGORY;
use crate::state::new_id;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{Read, Write};

pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];
pub const DEFAULT_DESCRIPTION: &str = "Imported Transaction";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Type,
    Category,
    Description,
    Amount,
}

const POSITIONAL: [Field; 5] = [
    Field::Date,
    Field::Type,
    Field::Category,
    Field::Description,
    Field::Amount,
];

fn field_for_header(h: &str) -> Option<Field> {
    match h.trim().to_ascii_lowercase().as_str() {
        "date" => Some(Field::Date),
        "type" => Some(Field::Type),
        "category" => Some(Field::Category),
        "description" => Some(Field::Description),
        "amount" => Some(Field::Amount),
        _ => None,
    }
}

pub fn export_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<(), CodecError> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    wtr.write_record(CSV_HEADERS)?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.kind.to_string(),
            t.category.clone(),
            t.description.clone(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads transactions from CSV. Headers are matched without regard to case;
/// a file whose first row has no known header is read positionally in export
/// order. Every row gets a new id.
pub fn import_csv<R: Read>(input: R, today: NaiveDate) -> Result<Vec<Transaction>, CodecError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut records = rdr.records();
    let first = match records.next() {
        Some(rec) => rec?,
        None => return Ok(Vec::new()),
    };
    let header: Vec<Option<Field>> = first.iter().map(field_for_header).collect();
    // A data row can contain a header word ("Amount" as a description), so
    // most of the cells have to be header names.
    let known = header.iter().filter(|h| h.is_some()).count();
    let filled = first.iter().filter(|v| !v.is_empty()).count();
    let (columns, first_is_data) = if known > 0 && known * 2 > filled {
        (header, false)
    } else {
        (POSITIONAL.iter().copied().map(Some).collect(), true)
    };

    let mut out = Vec::new();
    if first_is_data {
        push_row(&mut out, &columns, &first, today);
    }
    for rec in records {
        let rec = rec?;
        push_row(&mut out, &columns, &rec, today);
    }
    Ok(out)
}

fn push_row(out: &mut Vec<Transaction>, columns: &[Option<Field>], rec: &StringRecord, today: NaiveDate) {
    if rec.iter().all(|v| v.is_empty()) {
        return;
    }
    out.push(row_to_transaction(columns, rec, today));
}

fn field_value<'r>(columns: &[Option<Field>], rec: &'r StringRecord, field: Field) -> Option<&'r str> {
    columns
        .iter()
        .position(|c| *c == Some(field))
        .and_then(|i| rec.get(i))
        .filter(|v| !v.is_empty())
}

fn row_to_transaction(columns: &[Option<Field>], rec: &StringRecord, today: NaiveDate) -> Transaction {
    let value = |field: Field| field_value(columns, rec, field);

    let date = value(Field::Date)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or(today);
    let kind = value(Field::Type)
        .and_then(|k| k.parse::<TransactionType>().ok())
        .unwrap_or(TransactionType::Expense);
    let amount = value(Field::Amount)
        .and_then(|a| a.parse::<Decimal>().ok())
        .map(|a| a.abs())
        .unwrap_or(Decimal::ZERO);
    let category = value(Field::Category).unwrap_or(FALLBACK_CATEGORY).to_string();
    let description = value(Field::Description)
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    Transaction {
        id: new_id(),
        date,
        amount,
        category,
        description,
        kind,
        is_recurring: false,
    }
}

pub fn export_snapshot(transactions: &[Transaction]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parses a backup. Any malformed entry, including a negative amount,
/// rejects the whole snapshot.
pub fn restore_snapshot(text: &str) -> Result<Vec<Transaction>, CodecError> {
    let transactions: Vec<Transaction> = serde_json::from_str(text)?;
    if let Some(t) = transactions
        .iter()
        .find(|t| t.amount.is_sign_negative() && !t.amount.is_zero())
    {
        return Err(CodecError::NegativeAmount {
            id: t.id.clone(),
            amount: t.amount.to_string(),
        });
    }
    Ok(transactions)
}
