use chrono::{NaiveDate, TimeDelta};
use csr_cases::dataset::DatasetBounds;
use csr_cases::date_range::week_start;
use std::fmt;

/// The active reporting window, `start <= end` invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Errors raised while resolving a window from user input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WindowError {
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidRange { start, end } => {
                write!(f, "invalid date range: start {start} is after end {end}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

fn clamp(date: NaiveDate, bounds: DatasetBounds) -> NaiveDate {
    date.max(bounds.start).min(bounds.end)
}

impl TimeWindow {
    /// Range mode: both bounds are clamped into the dataset's opened-date
    /// span; fails if the clamped start is after the clamped end.
    pub fn range(
        start: NaiveDate,
        end: NaiveDate,
        bounds: DatasetBounds,
    ) -> Result<TimeWindow, WindowError> {
        let start = clamp(start, bounds);
        let end = clamp(end, bounds);
        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(TimeWindow { start, end })
    }

    /// Week mode: the Monday-to-Sunday week containing `day`.
    ///
    /// `day` defaults to `today` when today falls inside the dataset bounds,
    /// otherwise to the earliest opened date. Cannot fail: the chosen day is
    /// clamped into bounds before alignment.
    pub fn week_of(day: Option<NaiveDate>, bounds: DatasetBounds, today: NaiveDate) -> TimeWindow {
        let default_day = if bounds.start <= today && today <= bounds.end {
            today
        } else {
            bounds.start
        };
        let chosen = clamp(day.unwrap_or(default_day), bounds);
        let start = week_start(chosen);
        TimeWindow {
            start,
            end: start + TimeDelta::try_days(6).unwrap(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
