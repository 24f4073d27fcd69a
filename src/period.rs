// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Current-week (Mon..Sun) and current-month windows. Transactions carry a
//! calendar date only, so a window is an inclusive date range; this is the
//! same set as "Monday 00:00:00 through Sunday 23:59:59".

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindows {
    pub week: DateWindow,
    pub month: DateWindow,
}

impl PeriodWindows {
    /// Windows for the week and month containing `today`. Not cached: call
    /// again for every aggregation pass.
    pub fn containing(today: NaiveDate) -> Self {
        Self {
            week: week_of(today),
            month: month_of(today),
        }
    }

    pub fn at(instant: NaiveDateTime) -> Self {
        Self::containing(instant.date())
    }
}

pub fn week_of(date: NaiveDate) -> DateWindow {
    let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    DateWindow {
        start,
        end: start + Duration::days(6),
    }
}

pub fn month_of(date: NaiveDate) -> DateWindow {
    let start = date.with_day(1).unwrap_or(date);
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let end = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(date);
    DateWindow { start, end }
}
