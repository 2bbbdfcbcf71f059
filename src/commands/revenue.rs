// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{date_or_today, month_window, required};
use crate::forms::{revenue_batch, RevenueLine};
use crate::models::{Period, RevenueEntry};
use crate::store::{delete_existing, RecordStore};
use crate::utils::{fmt_date, fmt_money, get_currency, maybe_print_json, pretty_table};
use crate::window::DateWindow;
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cmp::Reverse;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Validates and stores every `--line` of one shift's revenue form.
pub fn add_lines(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<RevenueEntry>> {
    let date = date_or_today(sub)?;
    let period: Period = required(sub, "period")?.parse()?;
    let lines = sub
        .get_many::<String>("line")
        .context("At least one --line is required")?
        .map(|raw| raw.parse::<RevenueLine>())
        .collect::<Result<Vec<_>, _>>()?;
    let drafts = revenue_batch(date, period, &lines)?;
    let inserted = conn
        .insert_batch::<RevenueEntry>(&drafts)
        .context("Failed to record revenue")?;
    Ok(inserted)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let inserted = add_lines(conn, sub)?;
    let ccy = get_currency(conn)?;
    let total: Decimal = inserted.iter().map(|r| r.amount).sum();
    println!("{}", revenue_table(&inserted, &ccy));
    println!(
        "Recorded {} sale line(s), total {}",
        inserted.len(),
        fmt_money(&total, &ccy)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = RevenueFilter::from_matches(sub)?;
    let data = match conn.fetch_all::<RevenueEntry>() {
        Ok(rows) => filter.apply(rows),
        Err(e) => {
            tracing::error!(error = %e, "failed to load revenue entries");
            eprintln!("Could not load revenue entries: {}", e);
            Vec::new()
        }
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No revenue entries.");
            return Ok(());
        }
        let ccy = get_currency(conn)?;
        println!("{}", revenue_table(&data, &ccy));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing revenue entry id")?;
    delete_existing::<RevenueEntry, _>(conn, id).context("Failed to delete revenue entry")?;
    println!("Removed revenue entry {}", id);
    Ok(())
}

/// `--period`, `--month` and `--limit` of `revenue list`.
struct RevenueFilter {
    period: Option<Period>,
    window: Option<DateWindow>,
    limit: Option<usize>,
}

impl RevenueFilter {
    fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        let period = match sub.get_one::<String>("period") {
            Some(raw) => Some(raw.parse::<Period>()?),
            None => None,
        };
        let window = match sub.get_one::<String>("month") {
            Some(_) => Some(month_window(sub)?),
            None => None,
        };
        Ok(Self {
            period,
            window,
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }

    fn apply(&self, mut data: Vec<RevenueEntry>) -> Vec<RevenueEntry> {
        if let Some(period) = self.period {
            data.retain(|r| r.period == period);
        }
        if let Some(window) = &self.window {
            data.retain(|r| window.contains(r.date));
        }
        data.sort_by_key(|r| Reverse((r.date, r.created_at, r.id)));
        if let Some(limit) = self.limit {
            data.truncate(limit);
        }
        data
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<RevenueEntry>> {
    let filter = RevenueFilter::from_matches(sub)?;
    Ok(filter.apply(conn.fetch_all::<RevenueEntry>()?))
}

fn revenue_table(data: &[RevenueEntry], ccy: &str) -> comfy_table::Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                fmt_date(r.date),
                r.period.label().to_string(),
                r.subcategory.clone(),
                r.description.clone().unwrap_or_default(),
                fmt_money(&r.amount, ccy),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Shift", "Subcategory", "Description", "Amount"],
        rows,
    )
}
