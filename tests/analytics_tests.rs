// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendchart::analytics::{self, SortKey};
use spendchart::models::{Expense, YearMonth};
use spendchart::utils::validate_expense;

fn exp(id: i64, title: &str, category: &str, amount: i64, date: &str) -> Expense {
    Expense {
        id,
        title: title.into(),
        category: category.into(),
        amount: Decimal::from(amount),
        date: date.into(),
    }
}

fn scenario() -> Vec<Expense> {
    vec![
        exp(1, "Groceries", "Food", 40, "2024-01-05"),
        exp(2, "Snacks", "Food", 10, "2024-02-01"),
        exp(3, "Bus pass", "Transport", 20, "2024-01-20"),
    ]
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn category_and_monthly_totals_for_scenario() {
    let rows = scenario();

    let cats = analytics::category_totals(&rows);
    let cats: Vec<(&str, Decimal)> = cats.iter().map(|c| (c.category.as_str(), c.amount)).collect();
    assert_eq!(cats, vec![("Food", Decimal::from(50)), ("Transport", Decimal::from(20))]);

    let months = analytics::monthly_totals(&rows);
    let months: Vec<(String, Decimal)> = months
        .iter()
        .map(|m| (m.month.to_string(), m.amount))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2024-01".to_string(), Decimal::from(60)),
            ("2024-02".to_string(), Decimal::from(10)),
        ]
    );
}

#[test]
fn category_totals_sum_to_grand_total() {
    let mut rows = scenario();
    rows.push(exp(4, "Cinema", "Entertainment", 15, "2024-03-02"));
    rows.push(exp(5, "Pizza", "food", 12, "2024-03-03"));
    let sum: Decimal = analytics::category_totals(&rows).iter().map(|c| c.amount).sum();
    assert_eq!(sum, analytics::total(&rows));
}

#[test]
fn categories_are_case_sensitive() {
    let rows = vec![
        exp(1, "a", "Food", 1, "2024-01-01"),
        exp(2, "b", "food", 2, "2024-01-01"),
        exp(3, "c", "Food ", 3, "2024-01-01"),
    ];
    assert_eq!(analytics::category_totals(&rows).len(), 3);
    assert!(analytics::category_totals(&[]).is_empty());
}

#[test]
fn monthly_totals_ignore_input_order_and_bad_dates() {
    let mut rows = scenario();
    rows.push(exp(4, "Typo", "Food", 99, "2024-13-01"));
    rows.push(exp(5, "Old", "Food", 7, "2023-12-31"));
    let forward = analytics::monthly_totals(&rows);
    rows.reverse();
    let backward = analytics::monthly_totals(&rows);
    assert_eq!(forward, backward);

    let months: Vec<YearMonth> = forward.iter().map(|m| m.month).collect();
    assert_eq!(months.len(), 3);
    assert!(months.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(months[0], YearMonth { year: 2023, month: 12 });
}

#[test]
fn top_n_is_descending_and_stable() {
    let rows = vec![
        exp(1, "a", "X", 10, "2024-01-01"),
        exp(2, "b", "X", 50, "2024-01-01"),
        exp(3, "c", "X", 30, "2024-01-01"),
        exp(4, "d", "X", 50, "2024-01-01"),
        exp(5, "e", "X", 5, "2024-01-01"),
    ];
    let top = analytics::top_n(&rows, analytics::DEFAULT_TOP_N);
    let amounts: Vec<i64> = top.iter().map(|e| e.amount.try_into().unwrap()).collect();
    assert_eq!(amounts, vec![50, 50, 30, 10, 5]);
    assert_eq!(top[0].id, 2);
    assert_eq!(top[1].id, 4);

    assert!(analytics::top_n(&rows, 0).is_empty());
    assert!(analytics::top_n(&rows, -3).is_empty());
    assert_eq!(analytics::top_n(&rows, 2).len(), 2);
    assert_eq!(analytics::top_n(&rows, 50).len(), 5);
}

#[test]
fn month_to_date_only_counts_reference_month() {
    let rows = vec![
        exp(1, "a", "X", 100, "2024-05-01"),
        exp(2, "b", "X", 200, "2024-05-31"),
        exp(3, "c", "X", 400, "2023-05-15"),
        exp(4, "d", "X", 800, "2024-06-01"),
        exp(5, "e", "X", 1600, "not a date"),
    ];
    assert_eq!(
        analytics::month_to_date_total(&rows, ymd(2024, 5, 10)),
        Decimal::from(300)
    );
}

#[test]
fn budget_ratio_is_clamped_and_unset_without_limit() {
    let rows = vec![exp(1, "Rent", "Housing", 2500, "2024-05-02")];
    let today = ymd(2024, 5, 20);

    let over = analytics::budget_snapshot(&rows, today, Some(Decimal::from(2000)));
    assert_eq!(over.spent, Decimal::from(2500));
    assert_eq!(over.ratio, Some(Decimal::ONE));

    let half = analytics::budget_snapshot(&rows, today, Some(Decimal::from(5000)));
    assert_eq!(half.ratio, Some(Decimal::new(5, 1)));

    let zero = analytics::budget_snapshot(&rows, today, Some(Decimal::ZERO));
    assert_eq!(zero.ratio, None);
    assert_eq!(zero.limit, None);

    let unset = analytics::budget_snapshot(&rows, today, None);
    assert_eq!(unset.ratio, None);
    assert_eq!(unset.spent, Decimal::from(2500));
}

#[test]
fn filter_all_is_identity() {
    let rows = scenario();
    assert_eq!(analytics::filter_by_category(&rows, "All"), rows);
    let food = analytics::filter_by_category(&rows, "Food");
    assert_eq!(food.len(), 2);
    assert!(analytics::filter_by_category(&rows, "food").is_empty());
}

#[test]
fn sort_keys_order_records() {
    let rows = scenario();
    let ids = |key: SortKey| -> Vec<i64> {
        analytics::sort_records(&rows, key).iter().map(|e| e.id).collect()
    };
    assert_eq!(ids(SortKey::DateDesc), vec![2, 3, 1]);
    assert_eq!(ids(SortKey::DateAsc), vec![1, 3, 2]);
    assert_eq!(ids(SortKey::AmountDesc), vec![1, 3, 2]);
    assert_eq!(ids(SortKey::AmountAsc), vec![2, 3, 1]);
    assert_eq!(ids(SortKey::TitleAsc), vec![3, 1, 2]);
    assert_eq!(ids(SortKey::TitleDesc), vec![2, 1, 3]);
    // Food, Food, Transport; the two Food rows keep their order.
    assert_eq!(ids(SortKey::CategoryAsc), vec![1, 2, 3]);
    assert_eq!(ids("bogus".parse().unwrap()), vec![1, 2, 3]);
}

#[test]
fn recent_and_distinct_categories() {
    let rows = scenario();
    let recent: Vec<i64> = analytics::recent(&rows, 2).iter().map(|e| e.id).collect();
    assert_eq!(recent, vec![2, 3]);
    assert_eq!(analytics::distinct_categories(&rows), vec!["Food", "Transport"]);
}

fn huge(id: i64, category: &str, date: &str) -> Expense {
    let e = validate_expense("Yacht", category, "50000000000000000000000000000", date).unwrap();
    Expense {
        id,
        title: e.title,
        category: e.category,
        amount: e.amount,
        date: e.date,
    }
}

#[test]
fn sums_saturate_instead_of_overflowing() {
    let rows = vec![huge(1, "Toys", "2024-05-01"), huge(2, "Toys", "2024-05-02")];

    assert_eq!(analytics::total(&rows), Decimal::MAX);
    let cats = analytics::category_totals(&rows);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].amount, Decimal::MAX);
    let months = analytics::monthly_totals(&rows);
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].amount, Decimal::MAX);
    assert_eq!(
        analytics::month_to_date_total(&rows, ymd(2024, 5, 31)),
        Decimal::MAX
    );

    let snap = analytics::budget_snapshot(&rows, ymd(2024, 5, 31), Some(Decimal::from(100)));
    assert_eq!(snap.ratio, Some(Decimal::ONE));
}

#[test]
fn share_of_large_amounts_does_not_overflow() {
    let big = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
    assert_eq!(analytics::share_percent(big, big), Decimal::ONE_HUNDRED);
    assert_eq!(analytics::share_percent(big, Decimal::ZERO), Decimal::ZERO);

    let rows = vec![huge(1, "Toys", "2024-05-01"), huge(2, "Boats", "2024-05-02")];
    let grand = analytics::total(&rows);
    let share = analytics::share_percent(analytics::category_totals(&rows)[0].amount, grand);
    assert!(share > Decimal::from(63) && share < Decimal::from(64));
}

#[test]
fn unparsable_dates_sort_last() {
    let mut rows = scenario();
    rows.push(exp(4, "Rent", "Home", 500, "05/01/2024"));
    rows.push(exp(5, "Lamp", "Home", 30, "2024-03-01"));
    let ids = |key: SortKey| -> Vec<i64> {
        analytics::sort_records(&rows, key).iter().map(|e| e.id).collect()
    };
    assert_eq!(ids(SortKey::DateDesc), vec![5, 2, 3, 1, 4]);
    assert_eq!(ids(SortKey::DateAsc), vec![1, 3, 2, 5, 4]);

    let recent: Vec<i64> = analytics::recent(&rows, 5).iter().map(|e| e.id).collect();
    assert_eq!(recent, vec![5, 2, 3, 1, 4]);
}
