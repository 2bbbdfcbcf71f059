// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting computations over records already held in memory.
//!
//! Everything here is a pure function of a [`Dataset`] and a window; views
//! call them again from the full dataset whenever the selection changes.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Dataset, MainCategory};
use crate::window::DateWindow;

/// Chart colours, assigned to buckets by position and reused cyclically.
pub const PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d",
];

pub const INGREDIENT_LABEL: &str = "Ingredient purchases";
pub const OTHER_EXPENSE_LABEL: &str = "Other";
pub const OTHER_INCOME_LABEL: &str = "Other income";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

impl PeriodTotals {
    fn new(revenue: Decimal, expenses: Decimal) -> Self {
        Self {
            revenue,
            expenses,
            profit: revenue - expenses,
        }
    }
}

/// Revenue, expenses and profit for records dated inside `window`.
pub fn period_totals(data: &Dataset, window: &DateWindow) -> PeriodTotals {
    let mut revenue = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;

    for t in data.transactions.iter().filter(|t| window.contains(t.date)) {
        match t.main_category {
            MainCategory::Income => revenue += t.amount,
            MainCategory::Expense => expenses += t.amount,
        }
    }
    for p in data.purchases.iter().filter(|p| window.contains(p.date)) {
        expenses += p.total_price;
    }
    for r in data.revenue.iter().filter(|r| window.contains(r.date)) {
        revenue += r.amount;
    }

    PeriodTotals::new(revenue, expenses)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Transaction,
    Purchase,
    Revenue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub id: i64,
    pub date: NaiveDate,
    pub flow: Flow,
    pub amount: Decimal,
    pub label: String,
    pub source: Source,
}

/// Most recent activity across all three collections, newest day first.
///
/// Records on the same day keep their collection order (transactions,
/// purchases, revenue entries) and fetch order within a collection. Without
/// a window every dated record is eligible.
pub fn activity_feed(
    data: &Dataset,
    window: Option<&DateWindow>,
    limit: usize,
) -> Vec<ActivityItem> {
    let in_window = |d: Option<NaiveDate>| match window {
        Some(w) => w.contains(d),
        None => d.is_some(),
    };

    let mut items: Vec<ActivityItem> = Vec::new();
    for t in &data.transactions {
        let Some(date) = t.date.filter(|_| in_window(t.date)) else {
            continue;
        };
        let (flow, prefix) = match t.main_category {
            MainCategory::Income => (Flow::In, "Income"),
            MainCategory::Expense => (Flow::Out, "Expense"),
        };
        items.push(ActivityItem {
            id: t.id,
            date,
            flow,
            amount: t.amount,
            label: format!("{}: {}", prefix, t.subcategory),
            source: Source::Transaction,
        });
    }
    for p in &data.purchases {
        let Some(date) = p.date.filter(|_| in_window(p.date)) else {
            continue;
        };
        items.push(ActivityItem {
            id: p.id,
            date,
            flow: Flow::Out,
            amount: p.total_price,
            label: format!("Purchase: {}", p.item_name),
            source: Source::Purchase,
        });
    }
    for r in &data.revenue {
        let Some(date) = r.date.filter(|_| in_window(r.date)) else {
            continue;
        };
        items.push(ActivityItem {
            id: r.id,
            date,
            flow: Flow::In,
            amount: r.amount,
            label: format!("{} sale: {}", r.period.label(), r.subcategory),
            source: Source::Revenue,
        });
    }

    // sort_by is stable, so same-day items keep their union order
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(limit);
    items
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub label: String,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

/// One point per day of `window`, plus the summed totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub window: DateWindow,
    pub points: Vec<SeriesPoint>,
    pub totals: PeriodTotals,
}

/// Monday-start week containing `day`, labelled by weekday.
pub fn weekly_series(data: &Dataset, day: NaiveDate) -> Series {
    series_with_labels(data, DateWindow::week_of(day), "%a")
}

/// Calendar month containing `day`, labelled by day of month.
pub fn monthly_series(data: &Dataset, day: NaiveDate) -> Series {
    series_with_labels(data, DateWindow::month_of(day), "%d")
}

/// Dense series over an arbitrary window, labelled `dd/mm`.
pub fn daily_series(data: &Dataset, window: DateWindow) -> Series {
    series_with_labels(data, window, "%d/%m")
}

fn series_with_labels(data: &Dataset, window: DateWindow, label_fmt: &str) -> Series {
    let mut per_day: HashMap<NaiveDate, (Decimal, Decimal)> = HashMap::new();
    let mut bump = |date: Option<NaiveDate>, revenue: Decimal, expense: Decimal| {
        if let Some(d) = date.filter(|_| window.contains(date)) {
            let slot = per_day.entry(d).or_insert((Decimal::ZERO, Decimal::ZERO));
            slot.0 += revenue;
            slot.1 += expense;
        }
    };

    for t in &data.transactions {
        match t.main_category {
            MainCategory::Income => bump(t.date, t.amount, Decimal::ZERO),
            MainCategory::Expense => bump(t.date, Decimal::ZERO, t.amount),
        }
    }
    for p in &data.purchases {
        bump(p.date, Decimal::ZERO, p.total_price);
    }
    for r in &data.revenue {
        bump(r.date, r.amount, Decimal::ZERO);
    }

    let mut revenue_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    let points: Vec<SeriesPoint> = window
        .days()
        .map(|day| {
            let (revenue, expenses) = per_day
                .get(&day)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            revenue_total += revenue;
            expense_total += expenses;
            SeriesPoint {
                date: day,
                label: day.format(label_fmt).to_string(),
                revenue,
                expenses,
                profit: revenue - expenses,
            }
        })
        .collect();

    Series {
        window,
        points,
        totals: PeriodTotals::new(revenue_total, expense_total),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownBucket {
    pub label: String,
    pub value: Decimal,
    pub color: &'static str,
    /// Percentage of the breakdown total; absent when the total is zero.
    pub share: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub buckets: Vec<BreakdownBucket>,
    pub total: Decimal,
}

impl Breakdown {
    fn from_groups(groups: LabelTotals) -> Self {
        let total: Decimal = groups.entries.iter().map(|(_, v)| *v).sum();
        let buckets = groups
            .entries
            .into_iter()
            .map(|(label, value)| BreakdownBucket {
                label,
                value,
                color: PALETTE[0],
                share: None,
            })
            .collect();
        let mut out = Breakdown { buckets, total };
        out.assign_colors_and_shares();
        out
    }

    /// Largest bucket first; colours follow the new order.
    pub fn sorted_desc(mut self) -> Self {
        self.buckets.sort_by(|a, b| b.value.cmp(&a.value));
        self.assign_colors_and_shares();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn assign_colors_and_shares(&mut self) {
        let total = self.total.to_f64().unwrap_or(0.0);
        for (i, bucket) in self.buckets.iter_mut().enumerate() {
            bucket.color = PALETTE[i % PALETTE.len()];
            bucket.share = if self.total.is_zero() || total == 0.0 {
                None
            } else {
                bucket.value.to_f64().map(|v| v / total * 100.0)
            };
        }
    }
}

/// Label totals kept in first-seen order.
#[derive(Default)]
struct LabelTotals {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl LabelTotals {
    fn add(&mut self, label: &str, amount: Decimal) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), amount));
            }
        }
    }
}

/// Expenses by transaction subcategory, with all purchases in one
/// ingredient bucket.
pub fn expense_breakdown(data: &Dataset, window: &DateWindow) -> Breakdown {
    let mut groups = LabelTotals::default();
    for t in data
        .transactions
        .iter()
        .filter(|t| t.main_category == MainCategory::Expense && window.contains(t.date))
    {
        let label = t.subcategory.trim();
        let label = if label.is_empty() {
            OTHER_EXPENSE_LABEL
        } else {
            label
        };
        groups.add(label, t.amount);
    }
    for p in data.purchases.iter().filter(|p| window.contains(p.date)) {
        groups.add(INGREDIENT_LABEL, p.total_price);
    }
    Breakdown::from_groups(groups)
}

/// Revenue by shift, with income transactions in one extra bucket.
pub fn revenue_breakdown(data: &Dataset, window: &DateWindow) -> Breakdown {
    let mut groups = LabelTotals::default();
    for r in data.revenue.iter().filter(|r| window.contains(r.date)) {
        groups.add(r.period.label(), r.amount);
    }
    for t in data
        .transactions
        .iter()
        .filter(|t| t.main_category == MainCategory::Income && window.contains(t.date))
    {
        groups.add(OTHER_INCOME_LABEL, t.amount);
    }
    Breakdown::from_groups(groups)
}
