// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::db::ExpenseSource;
use crate::models::{BudgetSnapshot, Expense, ViewContext};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, user_id, sub)?,
        Some(("categories", sub)) => categories(conn, user_id, sub)?,
        Some(("monthly", sub)) => monthly(conn, user_id, sub)?,
        Some(("top", sub)) => top(conn, user_id, sub)?,
        Some(("budget", sub)) => budget(conn, user_id, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: Decimal,
    pub recent: Vec<Expense>,
}

pub fn summary_data(records: &[Expense], recent: usize) -> Summary {
    Summary {
        total: analytics::total(records),
        recent: analytics::recent(records, recent),
    }
}

fn summary(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let n = *sub.get_one::<usize>("recent").unwrap_or(&analytics::DEFAULT_RECENT);
    let data = summary_data(&records, n);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    println!("Total Spent: {}", ctx.format(data.total));
    if data.recent.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }
    let rows = data
        .recent
        .iter()
        .map(|e| {
            vec![
                e.date.clone(),
                e.title.clone(),
                e.category.clone(),
                ctx.format(e.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Title", "Category", "Amount"], rows)
    );
    Ok(())
}

fn categories(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let totals = analytics::category_totals(&records);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let grand = analytics::total(&records);
    let rows = totals
        .iter()
        .map(|c| {
            let share = analytics::share_percent(c.amount, grand);
            vec![c.category.clone(), ctx.format(c.amount), format!("{:.1}%", share)]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

fn monthly(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let totals = analytics::monthly_totals(&records);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let rows = totals
        .iter()
        .map(|m| vec![m.month.to_string(), ctx.format(m.amount)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], rows));
    Ok(())
}

fn top(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let n = *sub.get_one::<i64>("n").unwrap_or(&analytics::DEFAULT_TOP_N);
    let data = analytics::top_n(&records, n);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses yet");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|e| {
            vec![
                e.title.clone(),
                e.category.clone(),
                ctx.format(e.amount),
                e.date.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Title", "Category", "Amount", "Date"], rows)
    );
    Ok(())
}

/// One-line budget status as shown on the dashboard.
pub fn budget_line(ctx: &ViewContext, snap: &BudgetSnapshot) -> String {
    match (snap.limit, snap.ratio) {
        (Some(limit), Some(ratio)) => format!(
            "Spent this month: {} / {} ({:.0}%)",
            ctx.format(snap.spent),
            ctx.format(limit),
            ratio * Decimal::ONE_HUNDRED
        ),
        _ => format!("Spent this month: {} / Budget not set", ctx.format(snap.spent)),
    }
}

/// Reloads the user's records and computes the current month's budget status.
pub fn budget_status(
    source: &impl ExpenseSource,
    ctx: &ViewContext,
    user_id: i64,
) -> Result<BudgetSnapshot> {
    let records = source.fetch_expenses(user_id)?;
    Ok(analytics::budget_snapshot(&records, ctx.reference_date, ctx.budget_limit))
}

fn budget(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let snap = budget_status(conn, &ctx, user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snap)? {
        return Ok(());
    }
    println!("{}", budget_line(&ctx, &snap));
    println!("[{}]", progress_bar(snap.ratio.unwrap_or(Decimal::ZERO), 30));
    Ok(())
}

fn progress_bar(ratio: Decimal, width: usize) -> String {
    let filled = (ratio * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}
