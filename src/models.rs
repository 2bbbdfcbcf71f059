// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ShiftbookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainCategory {
    Expense,
    Income,
}

impl MainCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MainCategory::Expense => "expense",
            MainCategory::Income => "income",
        }
    }
}

impl FromStr for MainCategory {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(MainCategory::Expense),
            "income" => Ok(MainCategory::Income),
            other => Err(ShiftbookError::InvalidInput(format!(
                "Unknown main category '{}' (use expense|income)",
                other
            ))),
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-of-day bucket a revenue entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Evening => "evening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Evening => "Evening",
        }
    }
}

impl FromStr for Period {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Period::Morning),
            "evening" => Ok(Period::Evening),
            other => Err(ShiftbookError::InvalidInput(format!(
                "Unknown period '{}' (use morning|evening)",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    G,
    L,
    Ml,
    Pcs,
    Sac,
    Carton,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Kg,
        Unit::G,
        Unit::L,
        Unit::Ml,
        Unit::Pcs,
        Unit::Sac,
        Unit::Carton,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Pcs => "pcs",
            Unit::Sac => "sac",
            Unit::Carton => "carton",
        }
    }
}

impl FromStr for Unit {
    type Err = ShiftbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Unit::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == wanted)
            .ok_or_else(|| {
                ShiftbookError::InvalidInput(format!(
                    "Unknown unit '{}' (use kg|g|l|ml|pcs|sac|carton)",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored records may come back without a usable date; such rows match no window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub main_category: MainCategory,
    pub subcategory: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub main_category: MainCategory,
    pub subcategory: String,
    pub description: Option<String>,
    pub amount: Decimal,
}

/// An ingredient purchase line. `total_price` is frozen at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub date: NaiveDate,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl NewPurchase {
    pub fn new(
        date: NaiveDate,
        item_name: impl Into<String>,
        quantity: Decimal,
        unit: Unit,
        unit_price: Decimal,
    ) -> Self {
        Self {
            date,
            item_name: item_name.into(),
            quantity,
            unit,
            unit_price,
            total_price: quantity * unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub period: Period,
    pub subcategory: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRevenueEntry {
    pub date: NaiveDate,
    pub period: Period,
    pub subcategory: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// The three collections as fetched together for one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub purchases: Vec<Purchase>,
    pub revenue: Vec<RevenueEntry>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.purchases.is_empty() && self.revenue.is_empty()
    }
}
