// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category name that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered when adding an expense; any other name is accepted too.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Housing",
    "Entertainment",
    "Shopping",
    "Health",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub date: String, // YYYY-MM-DD, as stored
}

impl Expense {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// A calendar date truncated to year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short axis label such as `Jan 2024`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub spent: Decimal,
    pub limit: Option<Decimal>,
    /// `spent / limit`, capped at 1. `None` when no positive limit is set.
    pub ratio: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub budget: Decimal, // zero means "not set"
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            budget: Decimal::ZERO,
        }
    }
}

impl Settings {
    pub fn budget_limit(&self) -> Option<Decimal> {
        if self.budget > Decimal::ZERO {
            Some(self.budget)
        } else {
            None
        }
    }
}

/// Everything a view needs besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    pub reference_date: NaiveDate,
    pub currency: String,
    pub budget_limit: Option<Decimal>,
}

impl ViewContext {
    pub fn new(settings: &Settings, reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            currency: settings.currency.clone(),
            budget_limit: settings.budget_limit(),
        }
    }

    pub fn format(&self, amount: Decimal) -> String {
        crate::currency::format_currency(amount, &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_orders_and_labels() {
        let jan = YearMonth { year: 2024, month: 1 };
        let dec = YearMonth { year: 2023, month: 12 };
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
        assert_eq!(jan.label(), "Jan 2024");
    }

    #[test]
    fn unset_budget_has_no_limit() {
        assert_eq!(Settings::default().budget_limit(), None);
    }
}
