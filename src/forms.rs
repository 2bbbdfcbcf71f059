// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entry validation. Everything here runs before the store is touched, so a
//! rejected submission writes nothing.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Result, ShiftbookError};
use crate::models::{MainCategory, NewPurchase, NewRevenueEntry, NewTransaction, Period, Unit};

fn optional_decimal(raw: &str, what: &str) -> Result<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<Decimal>()
        .map(Some)
        .map_err(|_| ShiftbookError::InvalidInput(format!("Invalid {} '{}'", what, raw)))
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// One line of a purchase form: `item:quantity:unit:unit_price`.
///
/// Quantity and price may be left blank; such lines are skipped at submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLine {
    pub item_name: String,
    pub quantity: Option<Decimal>,
    pub unit: Unit,
    pub unit_price: Option<Decimal>,
}

impl PurchaseLine {
    fn is_complete(&self) -> bool {
        !self.item_name.trim().is_empty() && self.quantity.is_some() && self.unit_price.is_some()
    }
}

impl FromStr for PurchaseLine {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> Result<Self> {
        // Split from the right so item names may contain ':'
        let mut parts = s.rsplitn(4, ':');
        let price = parts.next().unwrap_or("");
        let unit = parts.next();
        let quantity = parts.next();
        let item = parts.next();
        let (Some(item), Some(quantity), Some(unit)) = (item, quantity, unit) else {
            return Err(ShiftbookError::InvalidInput(format!(
                "Invalid purchase line '{}', expected item:quantity:unit:unit_price",
                s
            )));
        };
        let unit = if unit.trim().is_empty() {
            Unit::default()
        } else {
            unit.parse::<Unit>()?
        };
        Ok(PurchaseLine {
            item_name: item.trim().to_string(),
            quantity: optional_decimal(quantity, "quantity")?,
            unit,
            unit_price: optional_decimal(price, "unit price")?,
        })
    }
}

/// One line of a revenue form: `subcategory:amount[:description]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueLine {
    pub subcategory: String,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl RevenueLine {
    fn is_complete(&self) -> bool {
        !self.subcategory.trim().is_empty() && self.amount.is_some()
    }
}

impl FromStr for RevenueLine {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let subcategory = parts.next().unwrap_or("");
        let Some(amount) = parts.next() else {
            return Err(ShiftbookError::InvalidInput(format!(
                "Invalid revenue line '{}', expected subcategory:amount[:description]",
                s
            )));
        };
        Ok(RevenueLine {
            subcategory: subcategory.trim().to_string(),
            amount: optional_decimal(amount, "amount")?,
            description: non_empty(parts.next()),
        })
    }
}

pub fn transaction_draft(
    date: NaiveDate,
    main_category: MainCategory,
    subcategory: &str,
    amount: Option<Decimal>,
    description: Option<&str>,
) -> Result<NewTransaction> {
    let subcategory = subcategory.trim();
    let Some(amount) = amount.filter(|_| !subcategory.is_empty()) else {
        return Err(ShiftbookError::Validation(
            "A transaction needs both a subcategory and an amount".into(),
        ));
    };
    if amount < Decimal::ZERO {
        return Err(ShiftbookError::Validation(format!(
            "Amount {} must not be negative; the main category carries the direction",
            amount
        )));
    }
    Ok(NewTransaction {
        date,
        main_category,
        subcategory: subcategory.to_string(),
        description: non_empty(description),
        amount,
    })
}

/// Turns the complete lines of a purchase form into drafts sharing `date`.
/// Total price is fixed here as quantity × unit price.
pub fn purchase_batch(date: NaiveDate, lines: &[PurchaseLine]) -> Result<Vec<NewPurchase>> {
    let complete: Vec<&PurchaseLine> = lines.iter().filter(|l| l.is_complete()).collect();
    if complete.is_empty() {
        return Err(ShiftbookError::Validation(
            "Fill in at least one complete line (item, quantity, unit price)".into(),
        ));
    }
    let mut drafts = Vec::with_capacity(complete.len());
    for line in complete {
        let (Some(quantity), Some(unit_price)) = (line.quantity, line.unit_price) else {
            continue;
        };
        if quantity <= Decimal::ZERO {
            return Err(ShiftbookError::Validation(format!(
                "Quantity for '{}' must be positive",
                line.item_name.trim()
            )));
        }
        if unit_price < Decimal::ZERO {
            return Err(ShiftbookError::Validation(format!(
                "Unit price for '{}' must not be negative",
                line.item_name.trim()
            )));
        }
        drafts.push(NewPurchase::new(
            date,
            line.item_name.trim(),
            quantity,
            line.unit,
            unit_price,
        ));
    }
    Ok(drafts)
}

pub fn revenue_batch(
    date: NaiveDate,
    period: Period,
    lines: &[RevenueLine],
) -> Result<Vec<NewRevenueEntry>> {
    let complete: Vec<&RevenueLine> = lines.iter().filter(|l| l.is_complete()).collect();
    if complete.is_empty() {
        return Err(ShiftbookError::Validation(
            "Fill in at least one complete line (subcategory, amount)".into(),
        ));
    }
    let mut drafts = Vec::with_capacity(complete.len());
    for line in complete {
        let Some(amount) = line.amount else {
            continue;
        };
        if amount < Decimal::ZERO {
            return Err(ShiftbookError::Validation(format!(
                "Amount for '{}' must not be negative",
                line.subcategory.trim()
            )));
        }
        drafts.push(NewRevenueEntry {
            date,
            period,
            subcategory: line.subcategory.trim().to_string(),
            amount,
            description: line.description.clone(),
        });
    }
    Ok(drafts)
}
