// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shiftbook::aggregate::{
    activity_feed, daily_series, expense_breakdown, monthly_series, period_totals,
    revenue_breakdown, weekly_series, Flow, Source, INGREDIENT_LABEL, OTHER_EXPENSE_LABEL,
    OTHER_INCOME_LABEL, PALETTE,
};
use shiftbook::models::{
    Dataset, MainCategory, Period, Purchase, RevenueEntry, Transaction, Unit,
};
use shiftbook::window::DateWindow;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, date: Option<&str>, kind: MainCategory, sub: &str, amount: &str) -> Transaction {
    Transaction {
        id,
        date: date.map(day),
        main_category: kind,
        subcategory: sub.into(),
        description: None,
        amount: dec(amount),
        created_at: None,
    }
}

fn purchase(id: i64, date: &str, item: &str, qty: &str, price: &str) -> Purchase {
    let quantity = dec(qty);
    let unit_price = dec(price);
    Purchase {
        id,
        date: Some(day(date)),
        item_name: item.into(),
        quantity,
        unit: Unit::Kg,
        unit_price,
        total_price: quantity * unit_price,
        created_at: None,
    }
}

fn sale(id: i64, date: &str, period: Period, sub: &str, amount: &str) -> RevenueEntry {
    RevenueEntry {
        id,
        date: Some(day(date)),
        period,
        subcategory: sub.into(),
        amount: dec(amount),
        description: None,
        created_at: None,
    }
}

fn sample() -> Dataset {
    Dataset {
        transactions: vec![
            tx(1, Some("2025-01-06"), MainCategory::Expense, "Gas", "4000"),
            tx(2, Some("2025-01-08"), MainCategory::Income, "Catering", "10000"),
            tx(3, Some("2025-01-20"), MainCategory::Expense, "Rent", "25000"),
            tx(4, None, MainCategory::Expense, "Ghost", "999"),
        ],
        purchases: vec![
            purchase(1, "2025-01-06", "Flour", "3", "500"),
            purchase(2, "2025-01-12", "Oil", "2", "1500"),
        ],
        revenue: vec![
            sale(1, "2025-01-06", Period::Morning, "Beignets", "7500"),
            sale(2, "2025-01-06", Period::Evening, "Soya", "12000"),
            sale(3, "2025-02-01", Period::Morning, "Beignets", "5000"),
        ],
    }
}

#[test]
fn totals_sum_every_collection_in_window() {
    let data = sample();
    let jan = DateWindow::month_of(day("2025-01-15"));
    let totals = period_totals(&data, &jan);

    // 7500 + 12000 sales, 10000 catering income
    assert_eq!(totals.revenue, dec("29500"));
    // 4000 + 25000 transactions, 1500 + 3000 purchases
    assert_eq!(totals.expenses, dec("33500"));
    assert_eq!(totals.profit, dec("-4000"));
}

#[test]
fn totals_over_split_windows_add_up() {
    let data = sample();
    let whole = DateWindow::new(day("2025-01-01"), day("2025-02-28")).unwrap();
    let first = DateWindow::new(day("2025-01-01"), day("2025-01-10")).unwrap();
    let second = DateWindow::new(day("2025-01-11"), day("2025-02-28")).unwrap();

    let all = period_totals(&data, &whole);
    let a = period_totals(&data, &first);
    let b = period_totals(&data, &second);
    assert_eq!(all.revenue, a.revenue + b.revenue);
    assert_eq!(all.expenses, a.expenses + b.expenses);
    assert_eq!(all.profit, a.profit + b.profit);
}

#[test]
fn undated_rows_never_count() {
    let data = Dataset {
        transactions: vec![tx(1, None, MainCategory::Income, "Tips", "500")],
        ..Dataset::default()
    };
    let wide = DateWindow::new(day("1970-01-01"), day("2100-12-31")).unwrap();
    assert_eq!(period_totals(&data, &wide).revenue, Decimal::ZERO);
    assert!(activity_feed(&data, None, 10).is_empty());
}

#[test]
fn purchase_total_feeds_expenses_and_deleting_it_removes_it() {
    let mut data = Dataset {
        purchases: vec![purchase(7, "2025-03-03", "Flour", "3", "500")],
        ..Dataset::default()
    };
    let window = DateWindow::week_of(day("2025-03-05"));
    assert_eq!(period_totals(&data, &window).expenses, dec("1500"));

    data.purchases.retain(|p| p.id != 7);
    assert_eq!(period_totals(&data, &window).expenses, Decimal::ZERO);
}

#[test]
fn empty_dataset_gives_zeroes_and_dense_series() {
    let data = Dataset::default();
    let week = weekly_series(&data, day("2025-01-08"));
    assert_eq!(week.points.len(), 7);
    assert_eq!(week.window.start(), day("2025-01-06"));
    assert_eq!(week.points[0].label, "Mon");
    assert_eq!(week.points[6].label, "Sun");
    assert!(week.points.iter().all(|p| p.revenue.is_zero() && p.expenses.is_zero()));

    assert_eq!(monthly_series(&data, day("2025-02-14")).points.len(), 28);
    assert_eq!(monthly_series(&data, day("2024-02-14")).points.len(), 29);
    assert_eq!(monthly_series(&data, day("2025-01-31")).points.len(), 31);

    let jan = DateWindow::month_of(day("2025-01-01"));
    let totals = period_totals(&data, &jan);
    assert!(totals.revenue.is_zero() && totals.expenses.is_zero() && totals.profit.is_zero());
    assert!(expense_breakdown(&data, &jan).is_empty());
}

#[test]
fn series_points_bucket_by_day() {
    let data = sample();
    let week = weekly_series(&data, day("2025-01-06"));
    let monday = &week.points[0];
    assert_eq!(monday.revenue, dec("19500"));
    assert_eq!(monday.expenses, dec("5500"));
    assert_eq!(monday.profit, dec("14000"));
    assert_eq!(week.points[2].revenue, dec("10000"));
    assert_eq!(week.points[6].expenses, dec("3000"));
    assert_eq!(week.totals.revenue, dec("29500"));
    assert_eq!(week.totals.expenses, dec("8500"));

    let month = monthly_series(&data, day("2025-01-20"));
    assert_eq!(month.points[0].label, "01");
    assert_eq!(month.points[19].expenses, dec("25000"));

    let trend = daily_series(&data, DateWindow::trailing_days(day("2025-01-07"), 7));
    assert_eq!(trend.points.len(), 7);
    assert_eq!(trend.points[5].label, "06/01");
    assert_eq!(trend.points[5].revenue, dec("19500"));
}

#[test]
fn feed_is_newest_first_and_stable_within_a_day() {
    let data = sample();
    let feed = activity_feed(&data, None, 50);

    // Undated transaction is left out
    assert_eq!(feed.len(), 8);
    assert_eq!(feed[0].date, day("2025-02-01"));
    assert_eq!(feed[0].label, "Morning sale: Beignets");
    assert_eq!(feed[0].flow, Flow::In);

    let monday: Vec<(Source, i64)> = feed
        .iter()
        .filter(|a| a.date == day("2025-01-06"))
        .map(|a| (a.source, a.id))
        .collect();
    assert_eq!(
        monday,
        vec![
            (Source::Transaction, 1),
            (Source::Purchase, 1),
            (Source::Revenue, 1),
            (Source::Revenue, 2),
        ]
    );
    let gas = feed.iter().find(|a| a.source == Source::Transaction && a.id == 1).unwrap();
    assert_eq!(gas.label, "Expense: Gas");
    assert_eq!(gas.flow, Flow::Out);
    let flour = feed.iter().find(|a| a.source == Source::Purchase && a.id == 1).unwrap();
    assert_eq!(flour.label, "Purchase: Flour");
    assert_eq!(flour.amount, dec("1500"));
}

#[test]
fn feed_respects_window_and_limit() {
    let data = sample();
    let jan = DateWindow::month_of(day("2025-01-01"));
    let feed = activity_feed(&data, Some(&jan), 3);
    assert_eq!(feed.len(), 3);
    assert_eq!(feed[0].date, day("2025-01-20"));
    assert_eq!(feed[1].date, day("2025-01-12"));
    assert_eq!(feed[2].label, "Income: Catering");

    assert!(activity_feed(&data, Some(&jan), 0).is_empty());
}

#[test]
fn expense_breakdown_groups_purchases_and_blank_subcategories() {
    let mut data = sample();
    data.transactions
        .push(tx(5, Some("2025-01-21"), MainCategory::Expense, "  ", "500"));
    let jan = DateWindow::month_of(day("2025-01-01"));
    let split = expense_breakdown(&data, &jan);

    let labels: Vec<&str> = split.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Gas", "Rent", OTHER_EXPENSE_LABEL, INGREDIENT_LABEL]);
    assert_eq!(split.buckets[3].value, dec("4500"));
    assert_eq!(split.total, dec("34000"));

    let shares: f64 = split.buckets.iter().filter_map(|b| b.share).sum();
    assert!((shares - 100.0).abs() < 1e-9);

    let sorted = split.sorted_desc();
    assert_eq!(sorted.buckets[0].label, "Rent");
    assert_eq!(sorted.buckets[0].color, PALETTE[0]);
    assert_eq!(sorted.buckets[3].label, OTHER_EXPENSE_LABEL);
}

#[test]
fn revenue_breakdown_splits_shifts_and_other_income() {
    let data = sample();
    let jan = DateWindow::month_of(day("2025-01-01"));
    let split = revenue_breakdown(&data, &jan);
    let got: Vec<(&str, Decimal)> = split
        .buckets
        .iter()
        .map(|b| (b.label.as_str(), b.value))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Morning", dec("7500")),
            ("Evening", dec("12000")),
            (OTHER_INCOME_LABEL, dec("10000")),
        ]
    );
}

#[test]
fn zero_total_breakdown_has_no_shares() {
    let data = Dataset {
        transactions: vec![tx(1, Some("2025-01-02"), MainCategory::Expense, "Gas", "0")],
        ..Dataset::default()
    };
    let split = expense_breakdown(&data, &DateWindow::month_of(day("2025-01-02")));
    assert_eq!(split.buckets.len(), 1);
    assert!(split.total.is_zero());
    assert_eq!(split.buckets[0].share, None);
}

#[test]
fn palette_cycles_past_six_buckets() {
    let transactions = (1..=8)
        .map(|i| {
            tx(
                i,
                Some("2025-01-02"),
                MainCategory::Expense,
                &format!("Cat{}", i),
                "100",
            )
        })
        .collect();
    let data = Dataset {
        transactions,
        ..Dataset::default()
    };
    let split = expense_breakdown(&data, &DateWindow::month_of(day("2025-01-02")));
    assert_eq!(split.buckets.len(), 8);
    assert_eq!(split.buckets[6].color, PALETTE[0]);
    assert_eq!(split.buckets[7].color, PALETTE[1]);
}

#[test]
fn window_rejects_reversed_bounds() {
    assert!(DateWindow::new(day("2025-01-10"), day("2025-01-01")).is_err());
    let w = DateWindow::new(day("2025-01-01"), day("2025-01-01")).unwrap();
    assert_eq!(w.len_days(), 1);
    assert_eq!(w.days().count(), 1);
    assert_eq!((w.start(), w.end()), (day("2025-01-01"), day("2025-01-01")));

    let feb = DateWindow::month_of(day("2025-02-10"));
    assert_eq!(feb.days().count(), feb.len_days());
    assert_eq!(feb.end(), day("2025-02-28"));
    assert!(w.contains(Some(day("2025-01-01"))));
    assert!(!w.contains(None));
}
