// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    activity_feed, daily_series, expense_breakdown, period_totals, ActivityItem, Breakdown, Flow,
    PeriodTotals, Series,
};
use crate::commands::{dataset_or_empty, month_window};
use crate::models::Dataset;
use crate::utils::{
    fmt_money, get_currency, get_recent_limit, get_setting, maybe_print_json, pretty_table, today,
};
use crate::window::DateWindow;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

/// Days shown in the dashboard revenue trend.
const TREND_DAYS: u32 = 7;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub window: DateWindow,
    pub totals: PeriodTotals,
    pub recent: Vec<ActivityItem>,
    pub expenses: Breakdown,
    pub trend: Series,
}

/// Builds the dashboard for `window` from a full dataset.
///
/// The revenue trend covers the last days of the window, ending today when
/// today falls inside it.
pub fn build_view(
    data: &Dataset,
    window: DateWindow,
    recent_limit: usize,
    now: NaiveDate,
) -> DashboardView {
    let trend_end = if window.contains(Some(now)) {
        now
    } else {
        window.end()
    };
    DashboardView {
        window,
        totals: period_totals(data, &window),
        recent: activity_feed(data, Some(&window), recent_limit),
        expenses: expense_breakdown(data, &window),
        trend: daily_series(data, DateWindow::trailing_days(trend_end, TREND_DAYS)),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = month_window(sub)?;
    let limit = match sub.get_one::<usize>("limit") {
        Some(l) => *l,
        None => get_recent_limit(conn)?,
    };

    let data = dataset_or_empty(conn);
    let view = build_view(&data, window, limit, today());
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    let ccy = get_currency(conn)?;
    if let Some(name) = get_setting(conn, "business_name")? {
        println!("{}", name);
    }
    println!("{} to {}", view.window.start(), view.window.end());
    println!(
        "{}",
        pretty_table(
            &["Revenue", "Expenses", "Net profit"],
            vec![vec![
                fmt_money(&view.totals.revenue, &ccy),
                fmt_money(&view.totals.expenses, &ccy),
                fmt_money(&view.totals.profit, &ccy),
            ]],
        )
    );

    println!("Recent activity");
    if view.recent.is_empty() {
        println!("  No recent activity");
    } else {
        let rows = view
            .recent
            .iter()
            .map(|a| {
                let sign = match a.flow {
                    Flow::In => "+",
                    Flow::Out => "-",
                };
                vec![
                    a.date.to_string(),
                    a.label.clone(),
                    format!("{} {}", sign, fmt_money(&a.amount, &ccy)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Activity", "Amount"], rows));
    }

    println!("Expense breakdown");
    if view.expenses.is_empty() {
        println!("  No expenses");
    } else {
        let rows = view
            .expenses
            .buckets
            .iter()
            .map(|b| vec![b.label.clone(), fmt_money(&b.value, &ccy), b.color.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Amount", "Colour"], rows));
    }

    println!("Revenue trend");
    let rows = view
        .trend
        .points
        .iter()
        .map(|p| vec![p.label.clone(), fmt_money(&p.revenue, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Day", "Revenue"], rows));
    Ok(())
}
