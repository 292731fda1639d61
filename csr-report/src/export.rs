//! CSV exports of report tables.
//!
//! Date columns in exported files use the `yyyy-mm-dd` format so they
//! re-import cleanly; trend values that are absent are written as empty
//! cells, not zeros.

use crate::assemble::WeeklyCountRow;
use anyhow::Context;
use csr_analytics::aggregate::AggregateRow;
use csr_analytics::trend::TrendPoint;
use csr_cases::record::{
    CaseRecord, EXPORT_DATE_FORMAT, CASE_OWNER_COLUMN, CASE_REASON_COLUMN, CASE_TYPE_COLUMN,
    LAST_MODIFIED_COLUMN, OPENED_DATE_COLUMN, PRODUCT_LINE_COLUMN, PRODUCT_MODEL_COLUMN,
    STATUS_COLUMN,
};
use std::io::{Read, Write};
use std::path::Path;

pub const COUNT_COLUMN: &str = "Record Count";

/// Write a grouped-count table: one column per dimension plus the count.
pub fn write_aggregate<W: Write>(
    writer: W,
    headers: &[&str],
    rows: &[AggregateRow],
) -> anyhow::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    let mut header_row: Vec<&str> = headers.to_vec();
    header_row.push(COUNT_COLUMN);
    out.write_record(&header_row)?;
    for row in rows {
        let mut record: Vec<String> = row.key.clone();
        record.push(row.count.to_string());
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_aggregate_csv(
    path: &Path,
    headers: &[&str],
    rows: &[AggregateRow],
) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_aggregate(file, headers, rows)
}

/// Re-import a grouped-count table written by [`write_aggregate`]. The last
/// column is the count; everything before it is the group key.
pub fn read_aggregate<R: Read>(reader: R) -> anyhow::Result<Vec<AggregateRow>> {
    let mut input = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for result in input.records() {
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();
        let (last, key) = fields
            .split_last()
            .context("aggregate row has no columns")?;
        let count: u32 = last
            .parse()
            .with_context(|| format!("bad count value {last:?}"))?;
        rows.push(AggregateRow {
            key: key.iter().map(|field| field.to_string()).collect(),
            count,
        });
    }
    Ok(rows)
}

pub fn read_aggregate_csv(path: &Path) -> anyhow::Result<Vec<AggregateRow>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_aggregate(file)
}

/// Write a weekly overview table.
pub fn write_weekly<W: Write>(
    writer: W,
    value_header: &str,
    rows: &[WeeklyCountRow],
) -> anyhow::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Week", value_header])?;
    for row in rows {
        out.write_record([row.label.as_str(), &row.count.to_string()])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_weekly_csv(
    path: &Path,
    value_header: &str,
    rows: &[WeeklyCountRow],
) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_weekly(file, value_header, rows)
}

/// Write a trend series. Absent values become empty cells.
pub fn write_trend<W: Write>(
    writer: W,
    value_header: &str,
    points: &[TrendPoint],
) -> anyhow::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Week Number", "Week Start", value_header])?;
    for point in points {
        let value = point.value.map(|v| format!("{v:.2}")).unwrap_or_default();
        out.write_record([
            point.week_index.to_string(),
            point.week_start.format(EXPORT_DATE_FORMAT).to_string(),
            value,
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_trend_csv(
    path: &Path,
    value_header: &str,
    points: &[TrendPoint],
) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_trend(file, value_header, points)
}

/// Write full case rows for a detailed report export.
pub fn write_cases<W: Write>(writer: W, records: &[CaseRecord]) -> anyhow::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        OPENED_DATE_COLUMN,
        LAST_MODIFIED_COLUMN,
        STATUS_COLUMN,
        CASE_OWNER_COLUMN,
        PRODUCT_LINE_COLUMN,
        CASE_REASON_COLUMN,
        PRODUCT_MODEL_COLUMN,
        CASE_TYPE_COLUMN,
    ])?;
    for record in records {
        out.write_record([
            record.opened_date.format(EXPORT_DATE_FORMAT).to_string(),
            record
                .last_modified_date
                .map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            record.status.clone(),
            record.case_owner.clone(),
            record.product_line.clone(),
            record.case_reason.clone().unwrap_or_default(),
            record.product_model.clone().unwrap_or_default(),
            record.case_type.clone().unwrap_or_default(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_cases_csv(path: &Path, records: &[CaseRecord]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_cases(file, records)
}
