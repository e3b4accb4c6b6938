// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over fetched expense records.
//!
//! Nothing here touches the store or the terminal. Records with a date that
//! does not parse are left out of date-based views instead of failing them.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::{ALL_CATEGORIES, BudgetSnapshot, Expense, YearMonth};

pub const DEFAULT_TOP_N: i64 = 5;
pub const DEFAULT_RECENT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: YearMonth,
    pub amount: Decimal,
}

/// Adds two amounts, pinning the result to the representable range on overflow.
pub fn add_amount(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or_else(|| {
        warn!(%acc, %amount, "amount sum overflowed, saturating");
        if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// `part` as a percentage of `whole`; zero when `whole` is zero or the result overflows.
pub fn share_percent(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

pub fn total(records: &[Expense]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, r| add_amount(acc, r.amount))
}

fn dated(r: &Expense) -> Option<NaiveDate> {
    let date = r.parsed_date();
    if date.is_none() {
        warn!(id = r.id, date = %r.date, "skipping expense with unparsable date");
    }
    date
}

/// Sum per exact category name, in first-seen order.
pub fn category_totals(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryTotal> = Vec::new();
    for r in records {
        match index.get(r.category.as_str()) {
            Some(&i) => out[i].amount = add_amount(out[i].amount, r.amount),
            None => {
                index.insert(r.category.as_str(), out.len());
                out.push(CategoryTotal {
                    category: r.category.clone(),
                    amount: r.amount,
                });
            }
        }
    }
    out
}

/// Sum per year-month, oldest month first.
pub fn monthly_totals(records: &[Expense]) -> Vec<MonthTotal> {
    let mut map: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for r in records {
        if let Some(date) = dated(r) {
            let slot = map.entry(YearMonth::of(date)).or_insert(Decimal::ZERO);
            *slot = add_amount(*slot, r.amount);
        }
    }
    map.into_iter()
        .map(|(month, amount)| MonthTotal { month, amount })
        .collect()
}

/// The `n` most expensive records, largest first. Equal amounts keep input order.
pub fn top_n(records: &[Expense], n: i64) -> Vec<Expense> {
    if n <= 0 {
        return Vec::new();
    }
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(usize::try_from(n).unwrap_or(usize::MAX));
    sorted
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

pub fn month_to_date_total(records: &[Expense], reference_date: NaiveDate) -> Decimal {
    records
        .iter()
        .filter(|r| dated(r).is_some_and(|d| same_month(d, reference_date)))
        .fold(Decimal::ZERO, |acc, r| add_amount(acc, r.amount))
}

/// Spending for the reference month against an optional limit.
///
/// The ratio never exceeds 1 even when the limit is overspent.
pub fn budget_snapshot(
    records: &[Expense],
    reference_date: NaiveDate,
    limit: Option<Decimal>,
) -> BudgetSnapshot {
    let spent = month_to_date_total(records, reference_date);
    let limit = limit.filter(|l| *l > Decimal::ZERO);
    let ratio = limit
        .and_then(|l| spent.checked_div(l))
        .map(|r| r.clamp(Decimal::ZERO, Decimal::ONE));
    BudgetSnapshot {
        spent,
        limit,
        ratio,
    }
}

pub fn filter_by_category(records: &[Expense], category: &str) -> Vec<Expense> {
    if category == ALL_CATEGORIES {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

/// Unique category names, sorted, for building a filter list.
pub fn distinct_categories(records: &[Expense]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Newest first by date, then by id.
pub fn recent(records: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| by_date(a, b, true).then(b.id.cmp(&a.id)));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    TitleAsc,
    TitleDesc,
    CategoryAsc,
    /// Leave records in the order they were given.
    Unsorted,
}

impl SortKey {
    pub const NAMES: [&'static str; 7] = [
        "date-desc",
        "date-asc",
        "amount-desc",
        "amount-asc",
        "title-asc",
        "title-desc",
        "category-asc",
    ];
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognised keys map to [`SortKey::Unsorted`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "date-desc" | "newest" => SortKey::DateDesc,
            "date-asc" | "oldest" => SortKey::DateAsc,
            "amount-desc" => SortKey::AmountDesc,
            "amount-asc" => SortKey::AmountAsc,
            "title-asc" => SortKey::TitleAsc,
            "title-desc" => SortKey::TitleDesc,
            "category-asc" => SortKey::CategoryAsc,
            _ => SortKey::Unsorted,
        })
    }
}

// Unparsable dates go last in both directions.
fn by_date(a: &Expense, b: &Expense, newest_first: bool) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(key: SortKey, a: &Expense, b: &Expense) -> Ordering {
    match key {
        SortKey::DateDesc => by_date(a, b, true),
        SortKey::DateAsc => by_date(a, b, false),
        SortKey::AmountDesc => b.amount.cmp(&a.amount),
        SortKey::AmountAsc => a.amount.cmp(&b.amount),
        SortKey::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        SortKey::CategoryAsc => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortKey::Unsorted => Ordering::Equal,
    }
}

pub fn sort_records(records: &[Expense], key: SortKey) -> Vec<Expense> {
    let mut sorted = records.to_vec();
    if key != SortKey::Unsorted {
        sorted.sort_by(|a, b| compare(key, a, b));
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(id: i64, title: &str, amount: i64) -> Expense {
        Expense {
            id,
            title: title.into(),
            category: "Food".into(),
            amount: Decimal::from(amount),
            date: "2024-01-01".into(),
        }
    }

    #[test]
    fn sort_key_parsing_falls_back_to_unsorted() {
        assert_eq!("Amount-Desc".parse::<SortKey>().unwrap(), SortKey::AmountDesc);
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Unsorted);
    }

    #[test]
    fn title_sort_ignores_case() {
        let rows = vec![exp(1, "banana", 1), exp(2, "Apple", 1), exp(3, "cherry", 1)];
        let titles: Vec<_> = sort_records(&rows, SortKey::TitleAsc)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn share_is_zero_for_empty_whole() {
        assert_eq!(share_percent(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(share_percent(Decimal::ONE, Decimal::from(4)), Decimal::from(25));
    }

    #[test]
    fn unparsable_date_is_skipped() {
        let mut bad = exp(1, "a", 1);
        bad.date = "01/02/2024".into();
        assert_eq!(dated(&bad), None);
        assert!(dated(&exp(2, "b", 1)).is_some());
    }

    #[test]
    fn huge_top_n_returns_everything() {
        let rows = vec![exp(1, "a", 1), exp(2, "b", 2)];
        assert_eq!(top_n(&rows, i64::MAX).len(), 2);
    }
}
