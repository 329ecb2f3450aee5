//! Weekly transaction summaries.
//!
//! # Responsibility
//! - Resolve the Sunday..Saturday calendar window around a reference day.
//! - Fold a week's transactions into per-day groups and week totals.
//!
//! # Invariants
//! - A summary always carries exactly seven day groups, Sunday first,
//!   including days without transactions.
//! - `net == income - expenses` for every summary.
//! - The window filter is inclusive at both ends: Sunday 00:00:00 through
//!   Saturday 23:59:59.

use crate::model::txn::Txn;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// The Sunday..Saturday calendar span containing some reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    /// The Sunday opening the week.
    pub start: NaiveDate,
    /// The Saturday closing the week.
    pub end: NaiveDate,
}

impl WeekWindow {
    /// First instant inside the window (Sunday 00:00:00).
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last instant inside the window (Saturday 23:59:59).
    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1)
    }

    /// Whether `at` falls inside the window, bounds included.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start_instant() && at <= self.end_instant()
    }
}

/// Resolves the week containing `reference`, anchored on Sunday.
pub fn week_window(reference: NaiveDate) -> WeekWindow {
    let days_back = i64::from(reference.weekday().num_days_from_sunday());
    let start = reference - Duration::days(days_back);
    WeekWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// Moves a reference day whole weeks forward or back, for week paging.
pub fn shift_week(reference: NaiveDate, by_weeks: i64) -> NaiveDate {
    reference + Duration::weeks(by_weeks)
}

/// One calendar day inside a weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// The day's transactions in input order; empty for quiet days.
    pub txns: Vec<Txn>,
    /// Net of the day: income positive, expenses negative.
    pub total: Decimal,
}

/// A full week of transactions folded into day groups and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub window: WeekWindow,
    /// Exactly seven entries, Sunday first.
    pub days: Vec<DayGroup>,
    /// Sum of non-expense amounts in the window.
    pub income: Decimal,
    /// Sum of expense amounts in the window, as a positive magnitude.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
}

/// Summarizes the week of `reference` from an arbitrary transaction slice.
///
/// Transactions outside the window are ignored; a week without any
/// transactions yields seven empty day groups and all-zero totals.
pub fn weekly_summary(txns: &[Txn], reference: NaiveDate) -> WeeklySummary {
    let window = week_window(reference);
    let week_txns: Vec<&Txn> = txns.iter().filter(|txn| window.contains(txn.date)).collect();

    let days = (0..7)
        .map(|offset| {
            let date = window.start + Duration::days(offset);
            let day_txns: Vec<Txn> = week_txns
                .iter()
                .filter(|txn| txn.date.date() == date)
                .map(|txn| (*txn).clone())
                .collect();
            let total = day_txns.iter().map(Txn::signed_amount).sum();
            DayGroup {
                date,
                txns: day_txns,
                total,
            }
        })
        .collect();

    let income: Decimal = week_txns
        .iter()
        .filter(|txn| !txn.is_expense)
        .map(|txn| txn.amount)
        .sum();
    let expenses: Decimal = week_txns
        .iter()
        .filter(|txn| txn.is_expense)
        .map(|txn| txn.amount)
        .sum();

    WeeklySummary {
        window,
        days,
        income,
        expenses,
        net: income - expenses,
    }
}
