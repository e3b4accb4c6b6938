// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analytics::add_amount;
use crate::models::{Expense, Settings};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendchart", "spendchart"));

/// Where the engine gets its records from.
pub trait ExpenseSource {
    fn fetch_expenses(&self, user_id: i64) -> Result<Vec<Expense>>;
}

impl ExpenseSource for Connection {
    fn fetch_expenses(&self, user_id: i64) -> Result<Vec<Expense>> {
        fetch_expenses(self, user_id, None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub date: String,
}

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendchart.sqlite"))
}

/// Opens the database at `path`, or the per-user default location.
pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    match path {
        Some(p) => open_at(p),
        None => open_at(&db_path()?),
    }
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    info!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        user_id INTEGER PRIMARY KEY,
        currency TEXT NOT NULL DEFAULT 'USD',
        budget TEXT NOT NULL DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date);
    "#,
    )
    .context("Failed to initialize schema")?;
    Ok(())
}

pub fn insert_expense(conn: &Connection, user_id: i64, e: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(user_id, title, category, amount, date) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, e.title, e.category, e.amount.to_string(), e.date],
    )
    .with_context(|| format!("Failed to insert expense '{}'", e.title))?;
    let id = conn.last_insert_rowid();
    debug!(user_id, id, "inserted expense");
    Ok(id)
}

/// Newest first; `limit` caps the number of rows.
pub fn fetch_expenses(
    conn: &Connection,
    user_id: i64,
    limit: Option<usize>,
) -> Result<Vec<Expense>> {
    let mut sql = String::from(
        "SELECT id, title, category, amount, date FROM expenses
         WHERE user_id=?1 ORDER BY date DESC, id DESC",
    );
    if limit.is_some() {
        sql.push_str(" LIMIT ?2");
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match limit {
        Some(n) => stmt.query(params![user_id, i64::try_from(n).unwrap_or(i64::MAX)])?,
        None => stmt.query(params![user_id])?,
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(3)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' for expense {}", amount_s, id))?;
        data.push(Expense {
            id,
            title: r.get(1)?,
            category: r.get(2)?,
            amount,
            date: r.get(4)?,
        });
    }
    Ok(data)
}

/// Returns whether a row belonging to `user_id` was removed.
pub fn delete_expense(conn: &Connection, id: i64, user_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM expenses WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}

pub fn delete_all_expenses(conn: &Connection, user_id: i64) -> Result<usize> {
    let n = conn.execute("DELETE FROM expenses WHERE user_id=?1", params![user_id])?;
    info!(user_id, removed = n, "cleared expenses");
    Ok(n)
}

fn sum_amounts(conn: &Connection, sql: &str, p: &[&dyn rusqlite::ToSql]) -> Result<Decimal> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(p)?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        let amount = s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in expenses", s))?;
        total = add_amount(total, amount);
    }
    Ok(total)
}

pub fn total_amount(conn: &Connection, user_id: i64) -> Result<Decimal> {
    sum_amounts(
        conn,
        "SELECT amount FROM expenses WHERE user_id=?1",
        params![user_id],
    )
}

pub fn total_amount_for_month(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<Decimal> {
    let key = format!("{:04}-{:02}", year, month);
    sum_amounts(
        conn,
        "SELECT amount FROM expenses WHERE user_id=?1 AND substr(date,1,7)=?2",
        params![user_id, key],
    )
}

pub fn load_settings(conn: &Connection, user_id: i64) -> Result<Settings> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT currency, budget FROM settings WHERE user_id=?1",
            params![user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    match row {
        Some((currency, budget_s)) => {
            let budget = budget_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid stored budget '{}'", budget_s))?;
            Ok(Settings { currency, budget })
        }
        None => Ok(Settings::default()),
    }
}

pub fn save_currency(conn: &Connection, user_id: i64, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(user_id, currency) VALUES(?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET currency=excluded.currency",
        params![user_id, ccy],
    )?;
    Ok(())
}

pub fn save_budget(conn: &Connection, user_id: i64, budget: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(user_id, budget) VALUES(?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET budget=excluded.budget",
        params![user_id, budget.to_string()],
    )?;
    Ok(())
}
