//! Date window used to select trades by the calendar date of their entry.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window end {end} must be after start {start}")]
    Empty { start: NaiveDate, end: NaiveDate },
}

/// Half-open range of calendar dates `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if end <= start {
            return Err(WindowError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering exactly one calendar day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day.succ_opt().unwrap_or(NaiveDate::MAX),
        }
    }

    /// The trading day before `run_date`. An end-of-day export that runs
    /// after midnight targets this window.
    pub fn previous_day(run_date: NaiveDate) -> Self {
        Self::single_day(run_date.pred_opt().unwrap_or(run_date))
    }

    /// True when the calendar date of `timestamp` lies inside the window.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.contains_date(timestamp.date())
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
