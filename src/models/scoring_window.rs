//! Scoring window model.
//!
//! This module contains the [`ScoringWindow`] type used to select the sales
//! and audit records that feed one scoring run, typically a calendar month
//! for the contest or a single day for the daily view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range of records to score.
///
/// # Example
///
/// ```
/// use dros_scoring::models::ScoringWindow;
/// use chrono::NaiveDate;
///
/// let march = ScoringWindow::month(2024, 3).unwrap();
///
/// assert_eq!(march.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(march.end_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// assert!(march.contains_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWindow {
    /// The first day of the window (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the window (inclusive).
    pub end_date: NaiveDate,
}

impl ScoringWindow {
    /// Creates a window, rejecting one that ends before it starts.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let window = Self {
            start_date,
            end_date,
        };
        window.validate()?;
        Ok(window)
    }

    /// Creates a window covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Creates a window covering a whole calendar month.
    ///
    /// Returns `None` for an invalid month number.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start_date,
            end_date: next_month.pred_opt()?,
        })
    }

    /// Creates the calendar-month window that contains `date`.
    pub fn month_of(date: NaiveDate) -> Option<Self> {
        Self::month(date.year(), date.month())
    }

    /// Checks that the window does not end before it starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this window (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Like [`contains_date`](Self::contains_date), but a record without a date is outside every window.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|d| self.contains_date(d))
    }
}
