// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Currency;
use once_cell::sync::Lazy;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const FALLBACK_CATEGORY: &str = "Other";

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Health",
    "Salary",
    "Investment",
    FALLBACK_CATEGORY,
];

static BUILTIN_CURRENCIES: Lazy<Vec<Currency>> = Lazy::new(|| {
    [
        ("USD", "US Dollar", "$"),
        ("EUR", "Euro", "€"),
        ("GBP", "British Pound", "£"),
        ("JPY", "Japanese Yen", "¥"),
        ("INR", "Indian Rupee", "₹"),
        ("CAD", "Canadian Dollar", "C$"),
        ("AUD", "Australian Dollar", "A$"),
        ("CHF", "Swiss Franc", "CHF"),
        ("CNY", "Chinese Yuan", "¥"),
        ("BRL", "Brazilian Real", "R$"),
    ]
    .into_iter()
    .map(|(code, name, symbol)| Currency {
        code: code.into(),
        name: name.into(),
        symbol: symbol.into(),
    })
    .collect()
});

pub fn builtin_currencies() -> &'static [Currency] {
    &BUILTIN_CURRENCIES
}

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Built-in currencies first, then user-added ones.
pub fn all_currencies(custom: &[Currency]) -> Vec<Currency> {
    builtin_currencies()
        .iter()
        .chain(custom.iter())
        .cloned()
        .collect()
}

pub fn find_currency<'a>(custom: &'a [Currency], code: &str) -> Option<&'a Currency> {
    let code = code.trim();
    builtin_currencies()
        .iter()
        .chain(custom.iter())
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Resolves the active currency, falling back to the first built-in entry
/// when the stored code no longer exists.
pub fn resolve_currency<'a>(custom: &'a [Currency], code: &str) -> &'a Currency {
    find_currency(custom, code).unwrap_or(&builtin_currencies()[0])
}

/// Case-insensitive lookup returning the canonical spelling.
pub fn find_category<'a>(categories: &'a [String], name: &str) -> Option<&'a str> {
    let name = name.trim();
    categories
        .iter()
        .find(|c| c.eq_ignore_ascii_case(name))
        .map(|c| c.as_str())
}
