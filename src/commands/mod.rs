// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod purchases;
pub mod reports;
pub mod revenue;
pub mod suggest;
pub mod transactions;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::models::Dataset;
use crate::store::load_dataset;
use crate::utils::{parse_date, parse_month, today};
use crate::window::DateWindow;

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("Missing required argument '{}'", name))
}

/// `--date` if given, else today.
pub(crate) fn date_or_today(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.get_one::<String>("date") {
        Some(raw) => parse_date(raw),
        None => Ok(today()),
    }
}

/// `--month` if given, else the current month.
pub(crate) fn month_window(m: &clap::ArgMatches) -> Result<DateWindow> {
    let day = match m.get_one::<String>("month") {
        Some(raw) => parse_month(raw)?,
        None => today(),
    };
    Ok(DateWindow::month_of(day))
}

/// Read views degrade to an empty state when the store cannot be read.
pub(crate) fn dataset_or_empty(conn: &Connection) -> Dataset {
    match load_dataset(conn) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "failed to load records");
            eprintln!("Could not load records: {}", e);
            Dataset::default()
        }
    }
}
