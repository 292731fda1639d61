use chrono::NaiveDate;
use csr_cases::config::StatusSet;
use csr_cases::record::CaseRecord;
use serde::Serialize;

/// One weekly checkpoint of a trend line.
///
/// `value` is `None` when no records contribute at that checkpoint; absent
/// is distinct from zero and serializes as JSON `null` so renderers can skip
/// the point without flattening the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub week_index: usize,
    pub week_start: NaiveDate,
    pub value: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Average open-case age at each weekly checkpoint.
///
/// At checkpoint `w`, the contributing records are those whose status is in
/// the open-for-averaging set and whose opened date is on or before `w`;
/// each contributes `w - opened_date` in whole days.
pub fn average_open_age<I>(
    records: &[&CaseRecord],
    open_for_averaging: &StatusSet,
    checkpoints: I,
) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = NaiveDate>,
{
    checkpoints
        .into_iter()
        .enumerate()
        .map(|(index, week)| {
            let ages: Vec<f64> = records
                .iter()
                .filter(|record| {
                    open_for_averaging.contains(&record.status) && record.opened_date <= week
                })
                .map(|record| (week - record.opened_date).num_days() as f64)
                .collect();
            TrendPoint {
                week_index: index + 1,
                week_start: week,
                value: mean(&ages),
            }
        })
        .collect()
}

/// Resolution/age blend at each weekly checkpoint.
///
/// Two independent means per checkpoint: the open mean as in
/// [`average_open_age`], and the mean resolution time (`last_modified -
/// opened` in whole days) of closed records whose last-modified date is on
/// or before the checkpoint. Negative resolution times are data errors and
/// are excluded, not clamped. The point's value averages whichever of the
/// two means exist; neither existing yields an absent point.
pub fn resolution_blend<I>(
    records: &[&CaseRecord],
    open_for_averaging: &StatusSet,
    closed_statuses: &StatusSet,
    checkpoints: I,
) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = NaiveDate>,
{
    checkpoints
        .into_iter()
        .enumerate()
        .map(|(index, week)| {
            let ages: Vec<f64> = records
                .iter()
                .filter(|record| {
                    open_for_averaging.contains(&record.status) && record.opened_date <= week
                })
                .map(|record| (week - record.opened_date).num_days() as f64)
                .collect();

            let resolutions: Vec<f64> = records
                .iter()
                .filter(|record| closed_statuses.contains(&record.status))
                .filter_map(|record| {
                    let modified = record.last_modified_date?;
                    if modified > week {
                        return None;
                    }
                    let days = (modified - record.opened_date).num_days();
                    if days < 0 {
                        return None;
                    }
                    Some(days as f64)
                })
                .collect();

            let value = match (mean(&ages), mean(&resolutions)) {
                (Some(open_mean), Some(closed_mean)) => Some((open_mean + closed_mean) / 2.0),
                (Some(open_mean), None) => Some(open_mean),
                (None, Some(closed_mean)) => Some(closed_mean),
                (None, None) => None,
            };

            TrendPoint {
                week_index: index + 1,
                week_start: week,
                value,
            }
        })
        .collect()
}
