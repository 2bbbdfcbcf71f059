// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_stored_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Problems found in stored rows, as (issue, detail) pairs.
pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    // 1) Dates that fall outside every window
    for table in ["transactions", "purchases", "revenue_entries"] {
        let mut stmt = conn.prepare(&format!("SELECT id, date FROM {} ORDER BY id", table))?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let date: Option<String> = r.get(1)?;
            match date {
                None => rows.push(("missing_date".into(), format!("{} #{}", table, id))),
                Some(d) if parse_stored_date(Some(&d)).is_none() => {
                    rows.push(("bad_date".into(), format!("{} #{} '{}'", table, id, d)))
                }
                Some(_) => {}
            }
        }
    }

    // 2) Amounts that are missing, unparsable or negative
    for (table, column) in [
        ("transactions", "amount"),
        ("revenue_entries", "amount"),
        ("purchases", "total_price"),
    ] {
        let mut stmt =
            conn.prepare(&format!("SELECT id, {} FROM {} ORDER BY id", column, table))?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let raw: Option<String> = r.get(1)?;
            match raw.as_deref().map(|s| s.trim().parse::<Decimal>()) {
                None => rows.push(("missing_amount".into(), format!("{} #{}", table, id))),
                Some(Err(_)) => rows.push((
                    "bad_amount".into(),
                    format!("{} #{} '{}'", table, id, raw.clone().unwrap_or_default()),
                )),
                Some(Ok(d)) if d < Decimal::ZERO => {
                    rows.push(("negative_amount".into(), format!("{} #{} {}", table, id, d)))
                }
                Some(Ok(_)) => {}
            }
        }
    }

    // 3) Purchase totals that no longer match quantity x unit price
    let mut stmt =
        conn.prepare("SELECT id, quantity, unit_price, total_price FROM purchases ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let qty: String = r.get(1)?;
        let price: String = r.get(2)?;
        let total: Option<String> = r.get(3)?;
        let (Ok(q), Ok(p), Some(Ok(t))) = (
            qty.trim().parse::<Decimal>(),
            price.trim().parse::<Decimal>(),
            total.as_deref().map(|s| s.trim().parse::<Decimal>()),
        ) else {
            continue;
        };
        if q * p != t {
            rows.push((
                "stale_total".into(),
                format!("purchases #{}: {} x {} != {}", id, q, p, t),
            ));
        }
    }

    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|(i, d)| vec![i, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
