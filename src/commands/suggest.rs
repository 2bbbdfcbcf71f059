// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::models::{MainCategory, Period, Purchase, RevenueEntry, Transaction};
use crate::store::RecordStore;
use crate::suggest::{
    filter_labels, purchase_suggestions, revenue_subcategories, transaction_subcategories,
    PurchaseSuggestion,
};
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("subcategories", sub)) => subcategories(conn, sub)?,
        Some(("items", sub)) => items(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Previously used subcategories for an expense/income kind or a shift,
/// filtered by `query`.
pub fn subcategory_list(conn: &Connection, kind: &str, query: &str) -> Result<Vec<String>> {
    let all = match kind {
        "morning" | "evening" => {
            let period: Period = kind.parse()?;
            revenue_subcategories(&conn.fetch_all::<RevenueEntry>()?, period)
        }
        _ => {
            let category: MainCategory = kind.parse()?;
            transaction_subcategories(&conn.fetch_all::<Transaction>()?, category)
        }
    };
    Ok(filter_labels(&all, query, |s| s.as_str())
        .into_iter()
        .cloned()
        .collect())
}

pub fn item_list(conn: &Connection, query: &str) -> Result<Vec<PurchaseSuggestion>> {
    let all = purchase_suggestions(&conn.fetch_all::<Purchase>()?);
    Ok(filter_labels(&all, query, |s| s.item_name.as_str())
        .into_iter()
        .cloned()
        .collect())
}

fn subcategories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = required(sub, "kind")?;
    let query = sub.get_one::<String>("query").map(|s| s.as_str()).unwrap_or("");
    let data = match subcategory_list(conn, kind, query) {
        Ok(list) => list,
        Err(e) => {
            tracing::error!(error = %e, "failed to load subcategory suggestions");
            Vec::new()
        }
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        for label in data {
            println!("{}", label);
        }
    }
    Ok(())
}

fn items(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let query = sub.get_one::<String>("query").map(|s| s.as_str()).unwrap_or("");
    let data = match item_list(conn, query) {
        Ok(list) => list,
        Err(e) => {
            tracing::error!(error = %e, "failed to load item suggestions");
            Vec::new()
        }
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.item_name.clone(),
                    fmt_money(&s.unit_price, &ccy),
                    s.unit.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Item", "Last unit price", "Unit"], rows)
        );
    }
    Ok(())
}
