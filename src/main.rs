// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use spendchart::commands::reports::{budget_line, budget_status};
use spendchart::events::EventBus;
use spendchart::{cli, commands, db, models::ViewContext, utils::today};

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    init_logging(matches.get_flag("verbose"));

    let user_id = *matches.get_one::<i64>("user").unwrap_or(&1);
    let path = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(path.as_deref())?;

    // Reprint the dashboard budget line after every change, like a refreshed view.
    let mut bus = EventBus::new();
    let refresh_path = path.clone();
    bus.subscribe(move |event| {
        let refreshed = db::open_or_init(refresh_path.as_deref()).and_then(|c| {
            let settings = db::load_settings(&c, event.user_id())?;
            let ctx = ViewContext::new(&settings, today());
            let snap = budget_status(&c, &ctx, event.user_id())?;
            Ok(budget_line(&ctx, &snap))
        });
        match refreshed {
            Ok(line) => println!("{}", line),
            Err(e) => error!(error = %e, "failed to refresh dashboard"),
        }
    });

    match matches.subcommand() {
        Some(("init", _)) => match &path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("expense", sub)) => commands::expenses::handle(&conn, &bus, user_id, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, user_id, sub)?,
        Some(("chart", sub)) => commands::charts::handle(&conn, user_id, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &bus, user_id, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    debug!(user_id, "done");
    Ok(())
}
