use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use std::mem::replace;

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::try_days(i64::from(date.weekday().num_days_from_monday())).unwrap()
}

/// An iterator over Mondays: yields the first Monday on or after the start
/// date, then every seventh day through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct WeekRange(pub NaiveDate, pub NaiveDate);

impl Iterator for WeekRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.weekday() != Weekday::Mon {
            self.0 = week_start(self.0) + TimeDelta::try_days(7).unwrap();
        }
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::try_days(7).unwrap();
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
