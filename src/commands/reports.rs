// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    expense_breakdown, monthly_series, period_totals, revenue_breakdown, weekly_series, Breakdown,
    Series,
};
use crate::commands::{dataset_or_empty, date_or_today, month_window, required};
use crate::models::Dataset;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, pretty_table};
use crate::window::DateWindow;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("week", sub)) => week(conn, sub)?,
        Some(("month", sub)) => month(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("totals", sub)) => totals(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn week(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let day = date_or_today(sub)?;
    let data = dataset_or_empty(conn);
    let series = weekly_series(&data, day);
    print_series(conn, sub, &series, "Week")
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let window = month_window(sub)?;
    let data = dataset_or_empty(conn);
    let series = monthly_series(&data, window.start());
    print_series(conn, sub, &series, "Month")
}

fn print_series(
    conn: &Connection,
    sub: &clap::ArgMatches,
    series: &Series,
    title: &str,
) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), series)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "{} {} to {}",
        title, series.window.start(), series.window.end()
    );
    let mut rows: Vec<Vec<String>> = series
        .points
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                p.date.to_string(),
                fmt_money(&p.revenue, &ccy),
                fmt_money(&p.expenses, &ccy),
                fmt_money(&p.profit, &ccy),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".into(),
        String::new(),
        fmt_money(&series.totals.revenue, &ccy),
        fmt_money(&series.totals.expenses, &ccy),
        fmt_money(&series.totals.profit, &ccy),
    ]);
    println!(
        "{}",
        pretty_table(&["Day", "Date", "Revenue", "Expenses", "Profit"], rows)
    );
    Ok(())
}

/// Category split for the selected month. Expenses come largest first as in
/// a margin analysis; revenue keeps first-seen order.
pub fn build_breakdown(data: &Dataset, window: &DateWindow, kind: &str) -> Breakdown {
    match kind {
        "revenue" => revenue_breakdown(data, window),
        _ => expense_breakdown(data, window).sorted_desc(),
    }
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let window = month_window(sub)?;
    let kind = required(sub, "kind")?;
    let data = dataset_or_empty(conn);
    let split = build_breakdown(&data, &window, kind);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &split)? {
        return Ok(());
    }
    if split.is_empty() || split.total.is_zero() {
        println!("No {} between {} and {}", kind, window.start(), window.end());
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let mut rows: Vec<Vec<String>> = split
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.value, &ccy),
                b.share
                    .map(|s| format!("{:.1}%", s))
                    .unwrap_or_else(|| "-".into()),
                b.color.to_string(),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".into(),
        fmt_money(&split.total, &ccy),
        "100.0%".into(),
        String::new(),
    ]);
    println!(
        "{}",
        pretty_table(&["Category", "Amount", "Share", "Colour"], rows)
    );
    Ok(())
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(required(sub, "from")?)?;
    let to = parse_date(required(sub, "to")?)?;
    let window = DateWindow::new(from, to)?;
    let data = dataset_or_empty(conn);
    let totals = period_totals(&data, &window);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "{}",
        pretty_table(
            &["From", "To", "Revenue", "Expenses", "Profit"],
            vec![vec![
                from.to_string(),
                to.to_string(),
                fmt_money(&totals.revenue, &ccy),
                fmt_money(&totals.expenses, &ccy),
                fmt_money(&totals.profit, &ccy),
            ]],
        )
    );
    Ok(())
}
