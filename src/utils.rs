// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::db::NewExpense;
use crate::models::DATE_FORMAT;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("Amount must be a number, got '{0}'")]
    NotANumber(String),
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    BadDate(String),
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `,` as the decimal separator; rejects negative values.
pub fn parse_budget(s: &str) -> Result<Decimal, InputError> {
    let normalized = s.trim().replace(',', ".");
    let v = normalized
        .parse::<Decimal>()
        .map_err(|_| InputError::NotANumber(s.to_string()))?;
    if v.is_sign_negative() && !v.is_zero() {
        return Err(InputError::Negative {
            field: "Budget",
            value: v,
        });
    }
    Ok(v)
}

/// Checks the fields of an expense form and returns the row to insert.
pub fn validate_expense(
    title: &str,
    category: &str,
    amount: &str,
    date: &str,
) -> Result<NewExpense, InputError> {
    let title = title.trim();
    let category = category.trim();
    let amount_s = amount.trim();
    if title.is_empty() {
        return Err(InputError::Empty("Title"));
    }
    if category.is_empty() {
        return Err(InputError::Empty("Category"));
    }
    if amount_s.is_empty() {
        return Err(InputError::Empty("Amount"));
    }
    let amount = amount_s
        .parse::<Decimal>()
        .map_err(|_| InputError::NotANumber(amount_s.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(InputError::Negative {
            field: "Amount",
            value: amount,
        });
    }
    let date = date.trim();
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| InputError::BadDate(date.to_string()))?;
    Ok(NewExpense {
        title: title.to_string(),
        category: category.to_string(),
        amount,
        date: date.to_string(),
    })
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
