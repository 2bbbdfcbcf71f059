// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::models::{Purchase, RevenueEntry, Transaction};
use crate::store::{Collection, Record, RecordStore};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let collection: Collection = required(m, "collection")?.parse()?;
    let fmt = required(m, "format")?.trim().to_lowercase();
    let out = required(m, "out")?;

    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let count = match collection {
        Collection::Transactions => export::<Transaction>(conn, &fmt, out)?,
        Collection::Purchases => export::<Purchase>(conn, &fmt, out)?,
        Collection::RevenueEntries => export::<RevenueEntry>(conn, &fmt, out)?,
    };
    println!("Exported {} {} to {}", count, collection, out);
    Ok(())
}

fn export<R: Record + Serialize>(conn: &Connection, fmt: &str, out: &str) -> Result<usize> {
    let records = conn
        .fetch_all::<R>()
        .with_context(|| format!("Failed to read {}", R::COLLECTION))?;
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Open {}", out))?;
            for record in &records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    Ok(records.len())
}
