// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store over the three collections.
//!
//! Every read is a whole-collection fetch; filtering by date or category is
//! left to the aggregation layer.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{Result, ShiftbookError};
use crate::models::{
    Dataset, NewPurchase, NewRevenueEntry, NewTransaction, Purchase, RevenueEntry, Transaction,
    Unit,
};
use crate::utils::parse_stored_date;

const CREATED_AT_FMT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Transactions,
    Purchases,
    RevenueEntries,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Purchases => "purchases",
            Collection::RevenueEntries => "revenue_entries",
        }
    }
}

impl FromStr for Collection {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transactions" | "tx" => Ok(Collection::Transactions),
            "purchases" | "purchase" => Ok(Collection::Purchases),
            "revenue" | "revenue_entries" | "revenue-entries" => Ok(Collection::RevenueEntries),
            other => Err(ShiftbookError::InvalidInput(format!(
                "Unknown collection '{}' (use transactions|purchases|revenue)",
                other
            ))),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A row type living in one collection.
pub trait Record: Sized {
    type Draft;
    const COLLECTION: Collection;
    /// Column list in the order `from_row` reads them.
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn insert_draft(conn: &Connection, draft: &Self::Draft, created_at: &str)
        -> rusqlite::Result<()>;
}

/// Data access capability consumed by commands and views.
pub trait RecordStore {
    fn fetch_all<R: Record>(&self) -> Result<Vec<R>>;
    fn insert_batch<R: Record>(&self, drafts: &[R::Draft]) -> Result<Vec<R>>;
    fn delete_by_id<R: Record>(&self, id: i64) -> Result<bool>;
}

impl RecordStore for Connection {
    fn fetch_all<R: Record>(&self) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            R::COLUMNS,
            R::COLLECTION.table()
        );
        let mut stmt = self.prepare(&sql)?;
        let rows = stmt.query_map([], R::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        debug!(collection = %R::COLLECTION, count = data.len(), "fetched collection");
        Ok(data)
    }

    fn insert_batch<R: Record>(&self, drafts: &[R::Draft]) -> Result<Vec<R>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let created_at = Utc::now().naive_utc().format(CREATED_AT_FMT).to_string();
        let tx = self.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            R::insert_draft(&tx, draft, &created_at)?;
            ids.push(tx.last_insert_rowid());
        }

        // Read back inside the transaction; the batch only lands with its rows
        let sql = format!(
            "SELECT {} FROM {} WHERE id=?1",
            R::COLUMNS,
            R::COLLECTION.table()
        );
        let mut inserted = Vec::with_capacity(ids.len());
        {
            let mut stmt = tx.prepare(&sql)?;
            for id in ids {
                inserted.push(stmt.query_row(params![id], R::from_row)?);
            }
        }
        tx.commit()?;
        debug!(collection = %R::COLLECTION, count = inserted.len(), "inserted batch");
        Ok(inserted)
    }

    fn delete_by_id<R: Record>(&self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id=?1", R::COLLECTION.table());
        let changed = self.execute(&sql, params![id])?;
        Ok(changed > 0)
    }
}

/// Fetches all three collections; aggregation only starts once every fetch
/// has succeeded.
pub fn load_dataset<S: RecordStore>(store: &S) -> Result<Dataset> {
    let transactions = store.fetch_all::<Transaction>()?;
    let purchases = store.fetch_all::<Purchase>()?;
    let revenue = store.fetch_all::<RevenueEntry>()?;
    Ok(Dataset {
        transactions,
        purchases,
        revenue,
    })
}

/// Deletes one record, turning a missing id into `NotFound`.
pub fn delete_existing<R: Record, S: RecordStore>(store: &S, id: i64) -> Result<()> {
    if store.delete_by_id::<R>(id)? {
        Ok(())
    } else {
        Err(ShiftbookError::NotFound {
            collection: R::COLLECTION.table(),
            id,
        })
    }
}

fn enum_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ShiftbookError>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// Missing or unparsable money columns count as zero.
fn money_column(row: &Row<'_>, idx: usize, what: &str, id: i64) -> rusqlite::Result<Decimal> {
    let raw: Option<String> = row.get(idx)?;
    match raw.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<Decimal>() {
            Ok(d) => Ok(d),
            Err(_) => {
                warn!(id, column = what, value = s, "unparsable amount, counting as zero");
                Ok(Decimal::ZERO)
            }
        },
        _ => {
            warn!(id, column = what, "missing amount, counting as zero");
            Ok(Decimal::ZERO)
        }
    }
}

// Units written by other clients may fall outside our vocabulary.
fn unit_column(row: &Row<'_>, idx: usize, id: i64) -> rusqlite::Result<Unit> {
    let raw: Option<String> = row.get(idx)?;
    let raw = raw.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(Unit::default());
    }
    match raw.parse::<Unit>() {
        Ok(unit) => Ok(unit),
        Err(_) => {
            warn!(id, value = raw.as_str(), "unknown unit, reading as kg");
            Ok(Unit::default())
        }
    }
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<chrono::NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(parse_stored_date(raw.as_deref()))
}

fn created_at_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.and_then(|s| {
        NaiveDateTime::parse_from_str(&s, CREATED_AT_FMT)
            .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }))
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Record for Transaction {
    type Draft = NewTransaction;
    const COLLECTION: Collection = Collection::Transactions;
    const COLUMNS: &'static str =
        "id, date, main_category, subcategory, description, amount, created_at";

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        let id: i64 = r.get(0)?;
        Ok(Transaction {
            id,
            date: date_column(r, 1)?,
            main_category: enum_column(r, 2)?,
            subcategory: r.get(3)?,
            description: optional_text(r.get(4)?),
            amount: money_column(r, 5, "amount", id)?,
            created_at: created_at_column(r, 6)?,
        })
    }

    fn insert_draft(conn: &Connection, d: &NewTransaction, created_at: &str) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO transactions(date, main_category, subcategory, description, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                d.date.to_string(),
                d.main_category.as_str(),
                d.subcategory,
                d.description,
                d.amount.to_string(),
                created_at
            ],
        )?;
        Ok(())
    }
}

impl Record for Purchase {
    type Draft = NewPurchase;
    const COLLECTION: Collection = Collection::Purchases;
    const COLUMNS: &'static str =
        "id, date, item_name, quantity, unit, unit_price, total_price, created_at";

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        let id: i64 = r.get(0)?;
        Ok(Purchase {
            id,
            date: date_column(r, 1)?,
            item_name: r.get(2)?,
            quantity: money_column(r, 3, "quantity", id)?,
            unit: unit_column(r, 4, id)?,
            unit_price: money_column(r, 5, "unit_price", id)?,
            total_price: money_column(r, 6, "total_price", id)?,
            created_at: created_at_column(r, 7)?,
        })
    }

    fn insert_draft(conn: &Connection, d: &NewPurchase, created_at: &str) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO purchases(date, item_name, quantity, unit, unit_price, total_price, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                d.date.to_string(),
                d.item_name,
                d.quantity.to_string(),
                d.unit.as_str(),
                d.unit_price.to_string(),
                d.total_price.to_string(),
                created_at
            ],
        )?;
        Ok(())
    }
}

impl Record for RevenueEntry {
    type Draft = NewRevenueEntry;
    const COLLECTION: Collection = Collection::RevenueEntries;
    const COLUMNS: &'static str =
        "id, date, period, subcategory, amount, description, created_at";

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        let id: i64 = r.get(0)?;
        Ok(RevenueEntry {
            id,
            date: date_column(r, 1)?,
            period: enum_column(r, 2)?,
            subcategory: r.get(3)?,
            amount: money_column(r, 4, "amount", id)?,
            description: optional_text(r.get(5)?),
            created_at: created_at_column(r, 6)?,
        })
    }

    fn insert_draft(
        conn: &Connection,
        d: &NewRevenueEntry,
        created_at: &str,
    ) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO revenue_entries(date, period, subcategory, amount, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                d.date.to_string(),
                d.period.as_str(),
                d.subcategory,
                d.amount.to_string(),
                d.description,
                created_at
            ],
        )?;
        Ok(())
    }
}
