// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::errors::ShiftbookError;
use crate::utils::{
    get_currency, get_recent_limit, get_setting, pretty_table, set_setting, DEFAULT_RECENT_LIMIT,
};
use anyhow::Result;
use rusqlite::Connection;

pub const KEYS: [&str; 3] = ["currency", "business_name", "recent_limit"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => get(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn get(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let keys: Vec<&str> = match sub.get_one::<String>("key") {
        Some(k) => vec![check_key(k)?],
        None => KEYS.to_vec(),
    };
    let mut rows = Vec::new();
    for key in keys {
        let value = match key {
            "currency" => get_currency(conn)?,
            "recent_limit" => get_recent_limit(conn)?.to_string(),
            _ => get_setting(conn, key)?.unwrap_or_default(),
        };
        rows.push(vec![key.to_string(), value]);
    }
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let key = check_key(required(sub, "key")?)?;
    let value = required(sub, "value")?.trim();
    validate(key, value)?;
    set_setting(conn, key, value)?;
    tracing::info!(key, value, "setting updated");
    println!("Set {} = {}", key, value);
    Ok(())
}

fn check_key(key: &str) -> Result<&'static str, ShiftbookError> {
    let key = key.trim();
    KEYS.iter().copied().find(|k| *k == key).ok_or_else(|| {
        ShiftbookError::InvalidInput(format!(
            "Unknown setting '{}' (use {})",
            key,
            KEYS.join("|")
        ))
    })
}

/// Rejects values the readers of a setting could not use.
pub fn validate(key: &str, value: &str) -> Result<(), ShiftbookError> {
    match key {
        "recent_limit" => match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err(ShiftbookError::InvalidInput(format!(
                "recent_limit must be a positive whole number (default {})",
                DEFAULT_RECENT_LIMIT
            ))),
        },
        "currency" if value.is_empty() => Err(ShiftbookError::InvalidInput(
            "currency label must not be empty".into(),
        )),
        _ => Ok(()),
    }
}
