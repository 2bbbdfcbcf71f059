// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::errors::{Result, ShiftbookError};

/// Inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ShiftbookError::InvalidInput(format!(
                "Window start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Monday-to-Sunday week containing `day`.
    pub fn week_of(day: NaiveDate) -> Self {
        let start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Calendar month containing `day`.
    pub fn month_of(day: NaiveDate) -> Self {
        let start = day.with_day(1).unwrap_or(day);
        let next = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next.and_then(|n| n.pred_opt()).unwrap_or(start);
        Self { start, end }
    }

    /// The `n` days ending on `day` inclusive.
    pub fn trailing_days(day: NaiveDate, n: u32) -> Self {
        let span = n.max(1) as i64 - 1;
        Self {
            start: day - Duration::days(span),
            end: day,
        }
    }

    // NaiveDate order is the same as the lexicographic order of ISO days.
    pub fn contains(&self, day: Option<NaiveDate>) -> bool {
        match day {
            Some(d) => d >= self.start && d <= self.end,
            None => false,
        }
    }

    pub fn len_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.len_days())
    }
}
