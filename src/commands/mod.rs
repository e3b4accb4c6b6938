// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod charts;
pub mod expenses;
pub mod reports;
pub mod settings;

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::models::ViewContext;
use crate::utils::{parse_date, today};

/// Builds the view context from stored settings and an optional `--as-of` date.
pub fn view_context(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<ViewContext> {
    let settings = db::load_settings(conn, user_id)?;
    let reference = match m.try_get_one::<String>("as-of").ok().flatten() {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    Ok(ViewContext::new(&settings, reference))
}
