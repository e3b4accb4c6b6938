// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::events::{DataEvent, EventBus};
use crate::utils::{parse_budget, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, bus: &EventBus, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, user_id, sub)?,
        Some(("currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().to_uppercase();
            db::save_currency(conn, user_id, &code)?;
            println!("Currency set to {}", code);
            bus.publish(DataEvent::SettingsChanged { user_id });
        }
        Some(("budget", sub)) => {
            let value = parse_budget(sub.get_one::<String>("amount").unwrap())?;
            db::save_budget(conn, user_id, value)?;
            let ccy = db::load_settings(conn, user_id)?.currency;
            println!(
                "Budget saved: {}",
                crate::currency::format_currency(value, &ccy)
            );
            bus.publish(DataEvent::SettingsChanged { user_id });
        }
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = super::view_context(conn, user_id, sub)?;
    let month_total = db::total_amount_for_month(
        conn,
        user_id,
        ctx.reference_date.year(),
        ctx.reference_date.month(),
    )?;
    let all_time = db::total_amount(conn, user_id)?;
    let budget = match ctx.budget_limit {
        Some(b) => ctx.format(b),
        None => "not set".to_string(),
    };
    let rows = vec![
        vec!["Currency".to_string(), ctx.currency.clone()],
        vec!["Monthly budget".to_string(), budget],
        vec!["Spent this month".to_string(), ctx.format(month_total)],
        vec!["Spent all time".to_string(), ctx.format(all_time)],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
