// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{date_or_today, month_window, required};
use crate::forms::transaction_draft;
use crate::models::{MainCategory, Transaction};
use crate::store::{delete_existing, RecordStore};
use crate::utils::{fmt_date, fmt_money, get_currency, maybe_print_json, parse_decimal, pretty_table};
use crate::window::DateWindow;
use anyhow::{Context, Result};
use rusqlite::Connection;
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

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let kind: MainCategory = required(sub, "kind")?.parse()?;
    let subcategory = required(sub, "subcategory")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = sub.get_one::<String>("description").map(|s| s.as_str());

    let draft = transaction_draft(date, kind, subcategory, Some(amount), description)?;
    let inserted = conn
        .insert_batch::<Transaction>(&[draft])
        .context("Failed to record transaction")?;
    let ccy = get_currency(conn)?;
    for t in &inserted {
        println!(
            "Recorded {} #{}: {} {} on {}",
            t.main_category,
            t.id,
            t.subcategory,
            fmt_money(&t.amount, &ccy),
            fmt_date(t.date)
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = TxFilter::from_matches(sub)?;
    let data = match conn.fetch_all::<Transaction>() {
        Ok(rows) => filter.apply(rows),
        Err(e) => {
            tracing::error!(error = %e, "failed to load transactions");
            eprintln!("Could not load transactions: {}", e);
            Vec::new()
        }
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions.");
            return Ok(());
        }
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    fmt_date(t.date),
                    t.main_category.to_string(),
                    t.subcategory.clone(),
                    t.description.clone().unwrap_or_default(),
                    fmt_money(&t.amount, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Subcategory", "Description", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing transaction id")?;
    delete_existing::<Transaction, _>(conn, id).context("Failed to delete transaction")?;
    println!("Removed transaction {}", id);
    Ok(())
}

/// `--month`, `--kind` and `--limit` of `tx list`, parsed before any fetch.
struct TxFilter {
    window: Option<DateWindow>,
    kind: Option<MainCategory>,
    limit: Option<usize>,
}

impl TxFilter {
    fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        let window = match sub.get_one::<String>("month") {
            Some(_) => Some(month_window(sub)?),
            None => None,
        };
        let kind = match sub.get_one::<String>("kind") {
            Some(raw) => Some(raw.parse::<MainCategory>()?),
            None => None,
        };
        Ok(Self {
            window,
            kind,
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }

    fn apply(&self, mut data: Vec<Transaction>) -> Vec<Transaction> {
        if let Some(window) = &self.window {
            data.retain(|t| window.contains(t.date));
        }
        if let Some(kind) = self.kind {
            data.retain(|t| t.main_category == kind);
        }
        data.sort_by_key(|t| Reverse((t.date, t.created_at, t.id)));
        if let Some(limit) = self.limit {
            data.truncate(limit);
        }
        data
    }
}

/// Transactions newest first, optionally narrowed by `--month`, `--kind`
/// and `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TxFilter::from_matches(sub)?;
    Ok(filter.apply(conn.fetch_all::<Transaction>()?))
}
