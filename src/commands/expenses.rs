// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, SortKey};
use crate::currency::format_currency;
use crate::db;
use crate::events::{DataEvent, EventBus};
use crate::models::{ALL_CATEGORIES, Expense};
use crate::utils::{maybe_print_json, pretty_table, today, validate_expense};
use anyhow::{Result, bail};
use rusqlite::Connection;
use tracing::warn;

pub fn handle(conn: &Connection, bus: &EventBus, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, bus, user_id, sub)?,
        Some(("list", sub)) => list(conn, user_id, sub)?,
        Some(("rm", sub)) => remove(conn, bus, user_id, sub)?,
        Some(("clear", sub)) => clear(conn, bus, user_id, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, bus: &EventBus, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => d.clone(),
        None => today().to_string(),
    };
    let new = validate_expense(
        sub.get_one::<String>("title").unwrap(),
        sub.get_one::<String>("category").unwrap(),
        sub.get_one::<String>("amount").unwrap(),
        &date,
    )?;
    let id = db::insert_expense(conn, user_id, &new)?;
    let ccy = db::load_settings(conn, user_id)?.currency;
    println!(
        "Recorded #{} '{}' ({}) {} on {}",
        id,
        new.title,
        new.category,
        format_currency(new.amount, &ccy),
        new.date
    );
    bus.publish(DataEvent::ExpensesChanged { user_id });
    Ok(())
}

/// Fetches the user's expenses and applies the list's filter, sort and limit.
pub fn query_rows(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let all = db::fetch_expenses(conn, user_id, None)?;
    let category = sub
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or(ALL_CATEGORIES);
    let key: SortKey = sub
        .get_one::<String>("sort")
        .map(|s| s.parse().unwrap_or(SortKey::Unsorted))
        .unwrap_or(SortKey::DateDesc);
    if key == SortKey::Unsorted {
        warn!("unknown sort key, keeping store order");
    }
    let mut rows = analytics::sort_records(&analytics::filter_by_category(&all, category), key);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, user_id, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = db::load_settings(conn, user_id)?.currency;
    if data.is_empty() {
        println!("No expenses found.");
        let known = analytics::distinct_categories(&db::fetch_expenses(conn, user_id, None)?);
        if !known.is_empty() {
            println!("Categories: {}, {}", ALL_CATEGORIES, known.join(", "));
        }
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.clone(),
                e.title.clone(),
                e.category.clone(),
                format_currency(e.amount, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Title", "Category", "Amount"], rows)
    );
    println!("Total: {}", format_currency(analytics::total(&data), &ccy));
    Ok(())
}

fn remove(conn: &Connection, bus: &EventBus, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let mut removed = 0;
    for id in sub.get_many::<i64>("id").into_iter().flatten() {
        if db::delete_expense(conn, *id, user_id)? {
            removed += 1;
        } else {
            warn!(id, user_id, "no such expense");
        }
    }
    println!("Removed {} expense(s)", removed);
    if removed > 0 {
        bus.publish(DataEvent::ExpensesChanged { user_id });
    }
    Ok(())
}

fn clear(conn: &Connection, bus: &EventBus, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all expenses without --yes");
    }
    let n = db::delete_all_expenses(conn, user_id)?;
    println!("All expenses have been deleted ({} rows).", n);
    bus.publish(DataEvent::ExpensesChanged { user_id });
    Ok(())
}
