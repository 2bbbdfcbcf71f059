// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Autocomplete lists built from previously entered labels.

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{MainCategory, Period, Purchase, RevenueEntry, Transaction, Unit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseSuggestion {
    pub item_name: String,
    pub unit_price: Decimal,
    pub unit: Unit,
}

/// Newest record first: `created_at` descending, then id descending.
fn newest_first<T>(
    records: &[T],
    key: impl Fn(&T) -> (Option<NaiveDateTime>, i64),
) -> Vec<&T> {
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|r| Reverse(key(*r)));
    sorted
}

fn dedup_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for label in labels.map(str::trim).filter(|l| !l.is_empty()) {
        if seen.insert(label) {
            out.push(label.to_string());
        }
    }
    out
}

/// Distinct subcategories used for `category`, most recently used first.
pub fn transaction_subcategories(
    records: &[Transaction],
    category: MainCategory,
) -> Vec<String> {
    let sorted = newest_first(records, |t| (t.created_at, t.id));
    dedup_labels(
        sorted
            .into_iter()
            .filter(|t| t.main_category == category)
            .map(|t| t.subcategory.as_str()),
    )
}

/// Distinct subcategories used for a revenue shift, most recently used first.
pub fn revenue_subcategories(records: &[RevenueEntry], period: Period) -> Vec<String> {
    let sorted = newest_first(records, |r| (r.created_at, r.id));
    dedup_labels(
        sorted
            .into_iter()
            .filter(|r| r.period == period)
            .map(|r| r.subcategory.as_str()),
    )
}

/// One suggestion per item name carrying the price and unit of its latest
/// purchase.
pub fn purchase_suggestions(records: &[Purchase]) -> Vec<PurchaseSuggestion> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for p in newest_first(records, |p| (p.created_at, p.id)) {
        if seen.insert(p.item_name.as_str()) {
            out.push(PurchaseSuggestion {
                item_name: p.item_name.clone(),
                unit_price: p.unit_price,
                unit: p.unit,
            });
        }
    }
    out
}

/// Case-insensitive substring filter; a blank query keeps everything.
pub fn filter_labels<'a, T>(
    items: &'a [T],
    query: &str,
    label: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| label(*item).to_lowercase().contains(&needle))
        .collect()
}
