use crate::window::TimeWindow;
use chrono::{Datelike, NaiveDate, TimeDelta};
use csr_cases::date_range::{week_start, WeekRange};
use csr_cases::record::{CaseRecord, DateField};

/// A Monday-aligned 7-day interval within the reporting window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
}

impl WeeklyBucket {
    /// The bucket beginning on `monday`.
    pub fn starting(monday: NaiveDate) -> WeeklyBucket {
        let week_end = monday + TimeDelta::try_days(6).unwrap();
        let iso = monday.iso_week();
        let label = format!(
            "Week {} FY {} ({} – {})",
            iso.week(),
            iso.year(),
            monday.format("%m/%d/%Y"),
            week_end.format("%m/%d/%Y")
        );
        WeeklyBucket {
            week_start: monday,
            week_end,
            label,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.week_start <= date && date <= self.week_end
    }
}

/// Partition a window into weekly buckets, from the bucket containing
/// `window.start` through the bucket containing `window.end`. The final
/// bucket may extend past the window's end.
///
/// Buckets are independent; the sequence is lazy and can be restarted by
/// calling again with the same window.
pub fn bucket_weeks(window: &TimeWindow) -> impl Iterator<Item = WeeklyBucket> {
    WeekRange(week_start(window.start), window.end).map(WeeklyBucket::starting)
}

/// Count the records whose chosen date field falls inside the bucket and
/// which satisfy the predicate. Records missing the field never match.
pub fn count_matching<F>(
    records: &[CaseRecord],
    field: DateField,
    bucket: &WeeklyBucket,
    predicate: F,
) -> usize
where
    F: Fn(&CaseRecord) -> bool,
{
    records
        .iter()
        .filter(|record| match record.date_field(field) {
            Some(date) => bucket.contains(date) && predicate(record),
            None => false,
        })
        .count()
}
