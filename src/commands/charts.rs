// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::chart::{self, ChartBox, DrawCommand};
use crate::db::ExpenseSource;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bar", sub)) => {
            let commands = bar_commands(conn, user_id, sub)?;
            print(&commands, sub.get_flag("json"))?;
        }
        Some(("line", sub)) => {
            let commands = line_commands(conn, user_id, sub)?;
            print(&commands, sub.get_flag("json"))?;
        }
        _ => {}
    }
    Ok(())
}

pub fn chart_box(sub: &clap::ArgMatches) -> ChartBox {
    let defaults = ChartBox::default();
    ChartBox {
        width: *sub.get_one::<f64>("width").unwrap_or(&defaults.width),
        height: *sub.get_one::<f64>("height").unwrap_or(&defaults.height),
        bar_gap: *sub.get_one::<f64>("gap").unwrap_or(&defaults.bar_gap),
        ..defaults
    }
}

pub fn bar_commands(
    conn: &Connection,
    user_id: i64,
    sub: &clap::ArgMatches,
) -> Result<Vec<DrawCommand>> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let totals = analytics::category_totals(&records);
    Ok(chart::project_bars(&totals, &chart_box(sub), |v| ctx.format(v)))
}

pub fn line_commands(
    conn: &Connection,
    user_id: i64,
    sub: &clap::ArgMatches,
) -> Result<Vec<DrawCommand>> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let records = conn.fetch_expenses(user_id)?;
    let totals = analytics::monthly_totals(&records);
    Ok(chart::project_line(&totals, &chart_box(sub), |v| ctx.format(v)))
}

fn print(commands: &[DrawCommand], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(commands)?);
    } else if commands.is_empty() {
        println!("No expenses yet");
    } else {
        println!(
            "{}",
            pretty_table(&["Primitive", "Geometry", "Text"], chart::describe(commands))
        );
    }
    Ok(())
}
