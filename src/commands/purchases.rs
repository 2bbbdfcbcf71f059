// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{date_or_today, month_window};
use crate::forms::{purchase_batch, PurchaseLine};
use crate::models::Purchase;
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

/// Validates and stores every `--line` of one purchase form.
pub fn add_lines(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Purchase>> {
    let date = date_or_today(sub)?;
    let lines = sub
        .get_many::<String>("line")
        .context("At least one --line is required")?
        .map(|raw| raw.parse::<PurchaseLine>())
        .collect::<Result<Vec<_>, _>>()?;
    let drafts = purchase_batch(date, &lines)?;
    let inserted = conn
        .insert_batch::<Purchase>(&drafts)
        .context("Failed to record purchases")?;
    Ok(inserted)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let inserted = add_lines(conn, sub)?;
    let ccy = get_currency(conn)?;
    let total: Decimal = inserted.iter().map(|p| p.total_price).sum();
    println!("{}", purchase_table(&inserted, &ccy));
    println!(
        "Recorded {} purchase line(s), total {}",
        inserted.len(),
        fmt_money(&total, &ccy)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = PurchaseFilter::from_matches(sub)?;
    let data = match conn.fetch_all::<Purchase>() {
        Ok(rows) => filter.apply(rows),
        Err(e) => {
            tracing::error!(error = %e, "failed to load purchases");
            eprintln!("Could not load purchases: {}", e);
            Vec::new()
        }
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No purchases.");
            return Ok(());
        }
        let ccy = get_currency(conn)?;
        println!("{}", purchase_table(&data, &ccy));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing purchase id")?;
    delete_existing::<Purchase, _>(conn, id).context("Failed to delete purchase")?;
    println!("Removed purchase {}", id);
    Ok(())
}

struct PurchaseFilter {
    window: Option<DateWindow>,
    limit: Option<usize>,
}

impl PurchaseFilter {
    fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        let window = match sub.get_one::<String>("month") {
            Some(_) => Some(month_window(sub)?),
            None => None,
        };
        Ok(Self {
            window,
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }

    fn apply(&self, mut data: Vec<Purchase>) -> Vec<Purchase> {
        if let Some(window) = &self.window {
            data.retain(|p| window.contains(p.date));
        }
        data.sort_by_key(|p| Reverse((p.date, p.created_at, p.id)));
        if let Some(limit) = self.limit {
            data.truncate(limit);
        }
        data
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Purchase>> {
    let filter = PurchaseFilter::from_matches(sub)?;
    Ok(filter.apply(conn.fetch_all::<Purchase>()?))
}

fn purchase_table(data: &[Purchase], ccy: &str) -> comfy_table::Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                fmt_date(p.date),
                p.item_name.clone(),
                p.quantity.normalize().to_string(),
                p.unit.to_string(),
                fmt_money(&p.unit_price, ccy),
                fmt_money(&p.total_price, ccy),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Item", "Qty", "Unit", "Unit price", "Total"],
        rows,
    )
}
