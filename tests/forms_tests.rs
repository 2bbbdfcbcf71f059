// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shiftbook::errors::ShiftbookError;
use shiftbook::forms::{purchase_batch, revenue_batch, transaction_draft, PurchaseLine, RevenueLine};
use shiftbook::models::{MainCategory, Period, Unit};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn purchase_line_parses_from_the_right() {
    let line: PurchaseLine = "Tomato paste: 400g:2:pcs:350".parse().unwrap();
    assert_eq!(line.item_name, "Tomato paste: 400g");
    assert_eq!(line.quantity, Some(Decimal::from(2)));
    assert_eq!(line.unit, Unit::Pcs);
    assert_eq!(line.unit_price, Some(Decimal::from(350)));

    let blank_unit: PurchaseLine = "Flour:3::500".parse().unwrap();
    assert_eq!(blank_unit.unit, Unit::Kg);

    assert!("Flour:3:500".parse::<PurchaseLine>().is_err());
    assert!("Flour:3:bucket:500".parse::<PurchaseLine>().is_err());
    assert!("Flour:three:kg:500".parse::<PurchaseLine>().is_err());
}

#[test]
fn purchase_batch_skips_incomplete_lines_and_computes_totals() {
    let lines: Vec<PurchaseLine> = ["Flour:3:kg:500", "Oil::l:1500", ":2:kg:100", "Sugar:1:sac:"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let drafts = purchase_batch(day("2025-01-06"), &lines).unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].item_name, "Flour");
    assert_eq!(drafts[0].total_price, Decimal::from(1500));
    assert_eq!(drafts[0].date, day("2025-01-06"));
}

#[test]
fn purchase_batch_without_complete_lines_is_rejected() {
    let lines: Vec<PurchaseLine> = vec!["Oil::l:1500".parse().unwrap()];
    assert!(matches!(
        purchase_batch(day("2025-01-06"), &lines),
        Err(ShiftbookError::Validation(_))
    ));
    assert!(matches!(
        purchase_batch(day("2025-01-06"), &[]),
        Err(ShiftbookError::Validation(_))
    ));
}

#[test]
fn purchase_batch_rejects_non_positive_quantity() {
    let lines: Vec<PurchaseLine> = vec!["Flour:0:kg:500".parse().unwrap()];
    assert!(purchase_batch(day("2025-01-06"), &lines).is_err());
    let lines: Vec<PurchaseLine> = vec!["Flour:1:kg:-5".parse().unwrap()];
    assert!(purchase_batch(day("2025-01-06"), &lines).is_err());
}

#[test]
fn revenue_lines_keep_colons_in_description() {
    let line: RevenueLine = "Beignets:7500:sold out by 9:30".parse().unwrap();
    assert_eq!(line.subcategory, "Beignets");
    assert_eq!(line.amount, Some(Decimal::from(7500)));
    assert_eq!(line.description.as_deref(), Some("sold out by 9:30"));

    let bare: RevenueLine = "Soya:".parse().unwrap();
    assert_eq!(bare.amount, None);
    assert!("Soya".parse::<RevenueLine>().is_err());
}

#[test]
fn revenue_batch_tags_every_entry_with_the_shift() {
    let lines: Vec<RevenueLine> = ["Beignets:7500", "Soya:", "Bouillie:3000:"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let drafts = revenue_batch(day("2025-01-06"), Period::Evening, &lines).unwrap();
    assert_eq!(drafts.len(), 2);
    assert!(drafts.iter().all(|d| d.period == Period::Evening));
    assert_eq!(drafts[1].subcategory, "Bouillie");
    assert_eq!(drafts[1].description, None);

    let empty: Vec<RevenueLine> = vec!["Soya:".parse().unwrap()];
    assert!(revenue_batch(day("2025-01-06"), Period::Morning, &empty).is_err());
}

#[test]
fn transaction_draft_needs_subcategory_and_amount() {
    let d = day("2025-01-06");
    let ok = transaction_draft(d, MainCategory::Expense, " Gas ", Some(Decimal::from(4000)), Some(""))
        .unwrap();
    assert_eq!(ok.subcategory, "Gas");
    assert_eq!(ok.description, None);

    assert!(matches!(
        transaction_draft(d, MainCategory::Income, "", Some(Decimal::from(10)), None),
        Err(ShiftbookError::Validation(_))
    ));
    assert!(matches!(
        transaction_draft(d, MainCategory::Income, "Tips", None, None),
        Err(ShiftbookError::Validation(_))
    ));
    assert!(transaction_draft(d, MainCategory::Expense, "Gas", Some(Decimal::from(-1)), None).is_err());
}
