//! Report section assembly.
//!
//! Every section is a pure function of the record store, the injected
//! configuration, the active window, and an explicit `today`. Each section's
//! criteria are written out in one place here; the divergences between
//! sections (which apply the owner filter, which status set selects the
//! cohort) are deliberate and documented in DESIGN.md rather than buried in
//! filter chains.

use crate::section::Section;
use chrono::{Datelike, NaiveDate};
use csr_analytics::aggregate::{group_count, with_grand_total, AggregateRow, Dimension};
use csr_analytics::buckets::{bucket_weeks, count_matching};
use csr_analytics::filter::CaseFilter;
use csr_analytics::trend::{average_open_age, resolution_blend, TrendPoint};
use csr_analytics::window::TimeWindow;
use csr_cases::config::ReportConfig;
use csr_cases::dataset::CaseData;
use csr_cases::date_range::WeekRange;
use csr_cases::record::{CaseRecord, DateField};
use log::debug;

const MISSING_LAST_MODIFIED: &str = "Missing 'Case Last Modified Date' column.";
const MISSING_CASE_REASON: &str = "Missing 'Case Reason' column.";
const MISSING_PRODUCT_MODEL: &str = "Missing 'Product Model' column.";
const MISSING_CASE_OWNER: &str = "Missing 'Case Owner' column.";

/// One row of a weekly overview table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyCountRow {
    pub label: String,
    pub count: usize,
}

/// The two weekly overview tables for the active window.
#[derive(Debug, Clone)]
pub struct WeeklyOverview {
    pub opened: Vec<WeeklyCountRow>,
    pub closed: Section<Vec<WeeklyCountRow>>,
}

/// Headline metrics for the active window.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMetrics {
    pub total_open: usize,
    pub now_closed: usize,
    pub closed_in_period: usize,
}

/// A breakdown pair: by (Product Line, Case Reason) with a grand total, and
/// by Product Line alone (the pie-chart table).
#[derive(Debug, Clone)]
pub struct Breakdown {
    pub by_reason: Section<Vec<AggregateRow>>,
    pub by_product_line: Vec<AggregateRow>,
}

/// The cases closed during the window, with their breakdown.
#[derive(Debug, Clone)]
pub struct ClosedInPeriod {
    pub cases: Vec<CaseRecord>,
    pub breakdown: Breakdown,
}

/// Everything derived from the active window's cohort.
#[derive(Debug, Clone)]
pub struct PeriodSections {
    pub metrics: PeriodMetrics,
    /// Detailed rows of the cohort, for the spreadsheet export.
    pub opened_cases: Vec<CaseRecord>,
    pub opened_breakdown: Section<Breakdown>,
    pub now_closed_breakdown: Section<Breakdown>,
    pub closed_in_period: Section<ClosedInPeriod>,
}

/// YTD open-case drill-down for one key product line.
#[derive(Debug, Clone)]
pub struct ProductLineAnalysis {
    pub product_line: String,
    pub total_open: usize,
    pub by_model: Section<Vec<AggregateRow>>,
    pub by_reason: Section<Vec<AggregateRow>>,
    pub by_owner: Section<Vec<AggregateRow>>,
}

/// YTD open-case backlog for the configured backlog owners.
#[derive(Debug, Clone)]
pub struct BacklogAnalysis {
    pub cases: Vec<CaseRecord>,
    pub by_product_line: Vec<AggregateRow>,
    pub by_model: Section<Vec<AggregateRow>>,
    pub by_reason: Section<Vec<AggregateRow>>,
    pub by_owner: Vec<AggregateRow>,
}

/// The age trend for one key product line.
#[derive(Debug, Clone)]
pub struct ProductAgeTrend {
    pub product_line: String,
    pub points: Section<Vec<TrendPoint>>,
}

/// The window-independent year-to-date trend sections.
#[derive(Debug, Clone)]
pub struct YtdTrends {
    pub average_age: Section<Vec<TrendPoint>>,
    pub resolution: Section<Vec<TrendPoint>>,
    pub per_product_line: Vec<ProductAgeTrend>,
}

/// The full assembled report.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub window: TimeWindow,
    pub weekly: WeeklyOverview,
    pub period: PeriodSections,
    pub product_analyses: Vec<ProductLineAnalysis>,
    pub backlog: Section<BacklogAnalysis>,
    pub trends: YtdTrends,
}

/// January 1 of the year containing `today`.
pub fn start_of_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap()
}

/// Weekly overview tables: cases opened per bucket (by opened date, open
/// statuses) and cases closed per bucket (by last-modified date, closed
/// statuses; skipped without the last-modified column).
pub fn weekly_overview(
    data: &CaseData,
    config: &ReportConfig,
    window: &TimeWindow,
) -> WeeklyOverview {
    let opened = bucket_weeks(window)
        .map(|bucket| {
            let count = count_matching(&data.records, DateField::Opened, &bucket, |record| {
                config.open_statuses.contains(&record.status)
            });
            WeeklyCountRow {
                label: bucket.label,
                count,
            }
        })
        .collect();

    let closed = if data.columns.last_modified {
        Section::Ready(
            bucket_weeks(window)
                .map(|bucket| {
                    let count =
                        count_matching(&data.records, DateField::LastModified, &bucket, |record| {
                            config.closed_statuses.contains(&record.status)
                        });
                    WeeklyCountRow {
                        label: bucket.label,
                        count,
                    }
                })
                .collect(),
        )
    } else {
        Section::Skipped(MISSING_LAST_MODIFIED.to_string())
    };

    WeeklyOverview { opened, closed }
}

fn breakdown_tables(records: &[&CaseRecord], has_reason: bool) -> Breakdown {
    let by_reason = if has_reason {
        Section::Ready(with_grand_total(group_count(
            records,
            &[Dimension::ProductLine, Dimension::CaseReason],
        )))
    } else {
        Section::Skipped(MISSING_CASE_REASON.to_string())
    };
    Breakdown {
        by_reason,
        by_product_line: group_count(records, &[Dimension::ProductLine]),
    }
}

fn breakdown(records: &[&CaseRecord], has_reason: bool, empty_notice: &str) -> Section<Breakdown> {
    if records.is_empty() {
        return Section::Empty(empty_notice.to_string());
    }
    Section::Ready(breakdown_tables(records, has_reason))
}

/// The cohort sections for the active window.
///
/// Cohort criteria: opened within the window, status in the open set, owner
/// in the selected owners. "Now closed" intersects the cohort with the
/// closed set (structurally empty when the two sets are disjoint; see
/// DESIGN.md). "Closed in period" is filtered by last-modified date and the
/// closed set with no owner criterion, matching the source report.
pub fn period_sections(
    data: &CaseData,
    config: &ReportConfig,
    window: &TimeWindow,
) -> PeriodSections {
    let cohort = CaseFilter::new()
        .opened_between(window.start, window.end)
        .status_in(&config.open_statuses)
        .owner_in(&config.selected_owners)
        .apply(&data.records);

    let now_closed: Vec<&CaseRecord> = cohort
        .iter()
        .copied()
        .filter(|record| config.closed_statuses.contains(&record.status))
        .collect();

    let closed_in_period: Vec<&CaseRecord> = if data.columns.last_modified {
        CaseFilter::new()
            .modified_between(window.start, window.end)
            .status_in(&config.closed_statuses)
            .apply(&data.records)
    } else {
        Vec::new()
    };

    let metrics = PeriodMetrics {
        total_open: cohort.len(),
        now_closed: now_closed.len(),
        closed_in_period: closed_in_period.len(),
    };

    let opened_breakdown = breakdown(
        &cohort,
        data.columns.case_reason,
        "No cases opened in the selected period.",
    );
    let now_closed_breakdown = breakdown(
        &now_closed,
        data.columns.case_reason,
        "No cases opened in this period are closed.",
    );

    let closed_in_period_section = if !data.columns.last_modified {
        Section::Skipped(MISSING_LAST_MODIFIED.to_string())
    } else if closed_in_period.is_empty() {
        Section::Empty("No cases closed in this period.".to_string())
    } else {
        Section::Ready(ClosedInPeriod {
            cases: closed_in_period.iter().map(|r| (*r).clone()).collect(),
            breakdown: breakdown_tables(&closed_in_period, data.columns.case_reason),
        })
    };

    PeriodSections {
        metrics,
        opened_cases: cohort.iter().map(|r| (*r).clone()).collect(),
        opened_breakdown,
        now_closed_breakdown,
        closed_in_period: closed_in_period_section,
    }
}

fn grouped_section(
    records: &[&CaseRecord],
    present: bool,
    dimension: Dimension,
    missing_notice: &str,
) -> Section<Vec<AggregateRow>> {
    if !present {
        return Section::Skipped(missing_notice.to_string());
    }
    let rows = group_count(records, &[dimension]);
    if rows.is_empty() {
        Section::Empty(format!("No {} values to break down.", dimension.label()))
    } else {
        Section::Ready(rows)
    }
}

/// YTD open-case analysis, one entry per configured key product line.
///
/// Criteria per line: opened in [Jan 1, today], status in the open set,
/// product line equal, case type not the excluded type. The same computation
/// is invoked once per line rather than being repeated per section.
pub fn product_line_sections(
    data: &CaseData,
    config: &ReportConfig,
    today: NaiveDate,
) -> Vec<ProductLineAnalysis> {
    let soy = start_of_year(today);
    config
        .key_product_lines
        .iter()
        .map(|line| {
            let records = CaseFilter::new()
                .opened_between(soy, today)
                .status_in(&config.open_statuses)
                .product_line(line)
                .type_not(&config.excluded_case_type)
                .apply(&data.records);
            ProductLineAnalysis {
                product_line: line.clone(),
                total_open: records.len(),
                by_model: grouped_section(
                    &records,
                    data.columns.product_model,
                    Dimension::ProductModel,
                    MISSING_PRODUCT_MODEL,
                ),
                by_reason: grouped_section(
                    &records,
                    data.columns.case_reason,
                    Dimension::CaseReason,
                    MISSING_CASE_REASON,
                ),
                by_owner: grouped_section(
                    &records,
                    data.columns.case_owner,
                    Dimension::CaseOwner,
                    MISSING_CASE_OWNER,
                ),
            }
        })
        .collect()
}

/// YTD open-case backlog, restricted to the configured backlog owners.
pub fn backlog_section(
    data: &CaseData,
    config: &ReportConfig,
    today: NaiveDate,
) -> Section<BacklogAnalysis> {
    if !data.columns.case_owner {
        return Section::Skipped(format!(
            "Cannot perform YTD backlog analysis: {MISSING_CASE_OWNER}"
        ));
    }

    let soy = start_of_year(today);
    let records = CaseFilter::new()
        .opened_between(soy, today)
        .status_in(&config.open_statuses)
        .owner_in(&config.backlog_owners)
        .apply(&data.records);

    if records.is_empty() {
        return Section::Empty(
            "No open cases found for the specified owners from the start of the year to date."
                .to_string(),
        );
    }

    Section::Ready(BacklogAnalysis {
        by_product_line: group_count(&records, &[Dimension::ProductLine]),
        by_model: grouped_section(
            &records,
            data.columns.product_model,
            Dimension::ProductModel,
            MISSING_PRODUCT_MODEL,
        ),
        by_reason: grouped_section(
            &records,
            data.columns.case_reason,
            Dimension::CaseReason,
            MISSING_CASE_REASON,
        ),
        by_owner: group_count(&records, &[Dimension::CaseOwner]),
        cases: records.iter().map(|r| (*r).clone()).collect(),
    })
}

/// The year-to-date trend sections, independent of the active window.
///
/// Checkpoints are the Mondays within [Jan 1, today]. The age trend filters
/// to the key product lines, selected owners, and non-excluded types; the
/// resolution blend takes the open-for-averaging plus closed statuses opened
/// since January 1.
pub fn ytd_trends(data: &CaseData, config: &ReportConfig, today: NaiveDate) -> YtdTrends {
    let soy = start_of_year(today);
    let checkpoints = WeekRange(soy, today);

    let average_age = {
        let records = CaseFilter::new()
            .status_in(&config.open_statuses_avg)
            .product_line_in(&config.key_product_lines)
            .owner_in(&config.selected_owners)
            .type_not(&config.excluded_case_type)
            .apply(&data.records);
        if records.is_empty() {
            Section::Empty(
                "No open cases found for the selected product lines and owners.".to_string(),
            )
        } else {
            Section::Ready(average_open_age(
                &records,
                &config.open_statuses_avg,
                checkpoints,
            ))
        }
    };

    let resolution = if !data.columns.last_modified {
        Section::Skipped(MISSING_LAST_MODIFIED.to_string())
    } else {
        let blend_statuses = config.open_statuses_avg.union(&config.closed_statuses);
        let records = CaseFilter::new()
            .status_in(&blend_statuses)
            .opened_since(soy)
            .type_not(&config.excluded_case_type)
            .apply(&data.records);
        if records.is_empty() {
            Section::Empty("No cases found with the specified open/closed statuses.".to_string())
        } else {
            Section::Ready(resolution_blend(
                &records,
                &config.open_statuses_avg,
                &config.closed_statuses,
                checkpoints,
            ))
        }
    };

    let per_product_line = config
        .key_product_lines
        .iter()
        .map(|line| {
            let records = CaseFilter::new()
                .status_in(&config.open_statuses_avg)
                .product_line(line)
                .owner_in(&config.selected_owners)
                .type_not(&config.excluded_case_type)
                .apply(&data.records);
            let points = if records.is_empty() {
                Section::Empty(format!(
                    "No open cases found for '{line}' to analyze the YTD age trend."
                ))
            } else {
                Section::Ready(average_open_age(
                    &records,
                    &config.open_statuses_avg,
                    checkpoints,
                ))
            };
            ProductAgeTrend {
                product_line: line.clone(),
                points,
            }
        })
        .collect();

    YtdTrends {
        average_age,
        resolution,
        per_product_line,
    }
}

/// Assemble the complete report. Sections share nothing but their inputs
/// and may be recomputed independently in any order.
pub fn assemble(
    data: &CaseData,
    config: &ReportConfig,
    window: TimeWindow,
    today: NaiveDate,
) -> CaseReport {
    debug!(
        "Assembling report over {} records, window {} to {}",
        data.len(),
        window.start,
        window.end
    );
    CaseReport {
        window,
        weekly: weekly_overview(data, config, &window),
        period: period_sections(data, config, &window),
        product_analyses: product_line_sections(data, config, today),
        backlog: backlog_section(data, config, today),
        trends: ytd_trends(data, config, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_cases::config::StatusSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> ReportConfig {
        ReportConfig {
            open_statuses: StatusSet::parse("New"),
            closed_statuses: StatusSet::parse("Closed - Complete"),
            open_statuses_avg: StatusSet::parse("New,In Process"),
            selected_owners: StatusSet::parse("A"),
            backlog_owners: StatusSet::parse("A"),
            key_product_lines: vec!["Barcode".to_string(), "RFID".to_string()],
            excluded_case_type: "RMA request".to_string(),
        }
    }

    /// Three-record scenario: two opened "New" in the first two weeks, one
    /// opened late in the window but already closed.
    fn scenario_data() -> CaseData {
        let csv = "\
Opened Date,Case Last Modified Date,Status,Case Owner,Product Line,Case Reason,Product Model,Type
01/01/2024,,New,A,Barcode,Hardware Fault,BX-100,Support request
08/01/2024,,New,A,Barcode,Configuration,BX-100,Support request
20/01/2024,25/01/2024,Closed - Complete,A,RFID,Hardware Fault,RX-9,Support request
";
        CaseData::from_csv_str(csv).unwrap()
    }

    fn scenario_window() -> TimeWindow {
        TimeWindow {
            start: ymd(2024, 1, 1),
            end: ymd(2024, 1, 21),
        }
    }

    #[test]
    fn test_weekly_overview_scenario() {
        let data = scenario_data();
        let config = config();
        let overview = weekly_overview(&data, &config, &scenario_window());

        let opened: Vec<usize> = overview.opened.iter().map(|row| row.count).collect();
        // weeks of Jan 1, Jan 8, Jan 15: the Jan 20 record has a non-open
        // status, so the third week counts zero
        assert_eq!(opened, vec![1, 1, 0]);

        let closed = overview.closed.ready().unwrap();
        let closed_counts: Vec<usize> = closed.iter().map(|row| row.count).collect();
        // the closure on Jan 25 falls outside every bucket in this window
        assert_eq!(closed_counts, vec![0, 0, 0]);
    }

    #[test]
    fn test_weekly_overview_skipped_without_last_modified() {
        let data = CaseData::from_csv_str("Opened Date,Status\n01/01/2024,New\n").unwrap();
        let overview = weekly_overview(
            &data,
            &config(),
            &TimeWindow {
                start: ymd(2024, 1, 1),
                end: ymd(2024, 1, 7),
            },
        );
        assert!(!overview.closed.is_ready());
        assert_eq!(overview.opened.len(), 1);
    }

    #[test]
    fn test_period_metrics_scenario() {
        let data = scenario_data();
        let config = config();
        let period = period_sections(&data, &config, &scenario_window());

        assert_eq!(period.metrics.total_open, 2);
        assert_eq!(period.metrics.now_closed, 0);
        // the only closed record's last-modified (Jan 25) is past the window
        assert_eq!(period.metrics.closed_in_period, 0);
        assert_eq!(period.opened_cases.len(), 2);
        assert!(matches!(period.closed_in_period, Section::Empty(_)));
    }

    #[test]
    fn test_opened_breakdown_has_grand_total() {
        let data = scenario_data();
        let config = config();
        let period = period_sections(&data, &config, &scenario_window());
        let breakdown = period.opened_breakdown.ready().unwrap();
        let rows = breakdown.by_reason.ready().unwrap();
        let total = rows.last().unwrap();
        assert_eq!(total.key[0], "Grand Total");
        assert_eq!(total.count, 2);
        assert_eq!(breakdown.by_product_line.len(), 1);
        assert_eq!(breakdown.by_product_line[0].key, vec!["Barcode"]);
        assert_eq!(breakdown.by_product_line[0].count, 2);
    }

    #[test]
    fn test_owner_filter_excludes_cohort_records() {
        let data = scenario_data();
        let mut config = config();
        config.selected_owners = StatusSet::parse("Somebody Else");
        let period = period_sections(&data, &config, &scenario_window());
        assert_eq!(period.metrics.total_open, 0);
        // closed-in-period carries no owner criterion, so it is unaffected
        assert_eq!(period.metrics.closed_in_period, 0);
        assert!(matches!(period.opened_breakdown, Section::Empty(_)));
    }

    #[test]
    fn test_product_line_sections_exclude_type() {
        let csv = "\
Opened Date,Status,Case Owner,Product Line,Case Reason,Product Model,Type
05/01/2024,New,A,Barcode,Hardware Fault,BX-100,Support request
06/01/2024,New,A,Barcode,Hardware Fault,BX-100,RMA request
07/01/2024,New,A,RFID,Configuration,RX-9,Support request
";
        let data = CaseData::from_csv_str(csv).unwrap();
        let analyses = product_line_sections(&data, &config(), ymd(2024, 3, 1));
        assert_eq!(analyses.len(), 2);
        let barcode = &analyses[0];
        assert_eq!(barcode.product_line, "Barcode");
        // the RMA-typed record is excluded
        assert_eq!(barcode.total_open, 1);
        assert_eq!(barcode.by_model.ready().unwrap()[0].count, 1);
        assert_eq!(analyses[1].total_open, 1);
    }

    #[test]
    fn test_backlog_skipped_without_owner_column() {
        let data = CaseData::from_csv_str("Opened Date,Status\n01/01/2024,New\n").unwrap();
        let backlog = backlog_section(&data, &config(), ymd(2024, 3, 1));
        assert!(matches!(backlog, Section::Skipped(_)));
    }

    #[test]
    fn test_backlog_owner_scope() {
        let csv = "\
Opened Date,Status,Case Owner,Product Line
05/01/2024,New,A,Barcode
06/01/2024,New,B,Barcode
";
        let data = CaseData::from_csv_str(csv).unwrap();
        let backlog = backlog_section(&data, &config(), ymd(2024, 3, 1));
        let backlog = backlog.ready().unwrap();
        assert_eq!(backlog.cases.len(), 1);
        assert_eq!(backlog.by_owner.len(), 1);
        assert_eq!(backlog.by_owner[0].key, vec!["A"]);
    }

    #[test]
    fn test_ytd_trends_scenario() {
        let csv = "\
Opened Date,Case Last Modified Date,Status,Case Owner,Product Line,Type
01/01/2024,,New,A,Barcode,Support request
01/01/2024,08/01/2024,Closed - Complete,A,Barcode,Support request
";
        let data = CaseData::from_csv_str(csv).unwrap();
        let trends = ytd_trends(&data, &config(), ymd(2024, 1, 15));

        let age = trends.average_age.ready().unwrap();
        // checkpoints: Jan 1, 8, 15; the open record ages 0, 7, 14
        assert_eq!(age.len(), 3);
        assert_eq!(age[0].value, Some(0.0));
        assert_eq!(age[2].value, Some(14.0));

        let blend = trends.resolution.ready().unwrap();
        // Jan 1: open age 0, no closure yet
        assert_eq!(blend[0].value, Some(0.0));
        // Jan 8: open age 7, resolution 7 -> blend 7
        assert_eq!(blend[1].value, Some(7.0));
        // Jan 15: open age 14, resolution 7 -> blend 10.5
        assert_eq!(blend[2].value, Some(10.5));

        assert_eq!(trends.per_product_line.len(), 2);
        assert!(trends.per_product_line[0].points.is_ready());
        // no RFID cases at all
        assert!(matches!(
            trends.per_product_line[1].points,
            Section::Empty(_)
        ));
    }

    #[test]
    fn test_fixture_report() {
        let data =
            CaseData::from_csv_str(include_str!("../../fixtures/sample_cases.csv")).unwrap();
        let config = ReportConfig {
            open_statuses: StatusSet::parse(
                "New,In Process,Waiting for customer response,Reopened",
            ),
            closed_statuses: StatusSet::parse("Closed - Complete"),
            open_statuses_avg: StatusSet::parse(
                "New,In Process,Waiting for customer response,Reopened",
            ),
            selected_owners: StatusSet::parse("Ana Silva,Raj Patel,Mei Chen"),
            backlog_owners: StatusSet::parse("Ana Silva"),
            key_product_lines: vec![
                "Barcode".to_string(),
                "RFID".to_string(),
                "PRI".to_string(),
                "Reach".to_string(),
            ],
            excluded_case_type: "RMA request".to_string(),
        };
        let window = TimeWindow {
            start: ymd(2024, 1, 1),
            end: ymd(2024, 1, 28),
        };
        let report = assemble(&data, &config, window, ymd(2024, 3, 1));

        let opened: Vec<usize> = report.weekly.opened.iter().map(|r| r.count).collect();
        assert_eq!(opened, vec![1, 1, 1, 2]);
        let closed: Vec<usize> = report
            .weekly
            .closed
            .ready()
            .unwrap()
            .iter()
            .map(|r| r.count)
            .collect();
        assert_eq!(closed, vec![1, 2, 1, 0]);

        assert_eq!(report.period.metrics.total_open, 5);
        assert_eq!(report.period.metrics.now_closed, 0);
        assert_eq!(report.period.metrics.closed_in_period, 4);

        // the reasonless cohort record drops out of the reason breakdown but
        // not the product-line one
        let breakdown = report.period.opened_breakdown.ready().unwrap();
        let reason_rows = breakdown.by_reason.ready().unwrap();
        assert_eq!(reason_rows.last().unwrap().count, 4);
        let product_sum: u32 = breakdown.by_product_line.iter().map(|r| r.count).sum();
        assert_eq!(product_sum, 5);

        let backlog = report.backlog.ready().unwrap();
        assert_eq!(backlog.cases.len(), 5);

        assert!(report.trends.average_age.is_ready());
        assert!(report.trends.resolution.is_ready());
        assert_eq!(report.trends.per_product_line.len(), 4);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let data = scenario_data();
        let config = config();
        let today = ymd(2024, 2, 1);
        let a = assemble(&data, &config, scenario_window(), today);
        let b = assemble(&data, &config, scenario_window(), today);
        assert_eq!(a.period.metrics, b.period.metrics);
        assert_eq!(
            a.weekly.opened.iter().map(|r| r.count).collect::<Vec<_>>(),
            b.weekly.opened.iter().map(|r| r.count).collect::<Vec<_>>()
        );
    }
}
