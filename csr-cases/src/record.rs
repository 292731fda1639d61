use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Serialize;
use std::fmt;

/// Required column: a row without a parseable value here is a fatal load error.
pub const OPENED_DATE_COLUMN: &str = "Opened Date";
pub const LAST_MODIFIED_COLUMN: &str = "Case Last Modified Date";
pub const STATUS_COLUMN: &str = "Status";
pub const CASE_OWNER_COLUMN: &str = "Case Owner";
pub const PRODUCT_LINE_COLUMN: &str = "Product Line";
pub const CASE_REASON_COLUMN: &str = "Case Reason";
pub const PRODUCT_MODEL_COLUMN: &str = "Product Model";
pub const CASE_TYPE_COLUMN: &str = "Type";

/// Date format used for exported spreadsheets: "YYYY-MM-DD"
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted datetime formats for input cells, day-first convention.
const DATETIME_FORMATS: &[&str] = &["%d/%m/%Y %H:%M", "%d/%m/%Y %H:%M:%S"];

/// Accepted date formats for input cells. Day-first variants come first;
/// ISO is accepted last so exported files re-import cleanly.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d %b %Y", "%Y-%m-%d"];

/// Errors that can occur while loading a case export file.
#[derive(Debug, PartialEq, Clone)]
pub enum LoadError {
    /// The required `Opened Date` column is not in the header row.
    MissingOpenedDate,
    /// A row's `Opened Date` cell could not be parsed.
    UnparsableDate { row: usize, value: String },
    /// The CSV reader itself failed (malformed file).
    Csv(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingOpenedDate => {
                write!(f, "the uploaded file must contain an '{OPENED_DATE_COLUMN}' column")
            }
            LoadError::UnparsableDate { row, value } => {
                write!(f, "row {row}: cannot parse '{OPENED_DATE_COLUMN}' value {value:?}")
            }
            LoadError::Csv(msg) => write!(f, "error processing case file: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// One support-case row from the uploaded dataset.
///
/// `opened_date` is always present; every other field mirrors an optional
/// input column. String fields tied to optional columns are `None` when the
/// column is absent or the cell is empty, so filters and groupings can treat
/// "missing" uniformly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub opened_date: NaiveDate,
    pub last_modified_date: Option<NaiveDate>,
    pub status: String,
    pub case_owner: String,
    pub product_line: String,
    pub case_reason: Option<String>,
    pub product_model: Option<String>,
    pub case_type: Option<String>,
}

/// Which of a record's two date fields a computation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Opened,
    LastModified,
}

impl CaseRecord {
    /// The value of the chosen date field; `None` when the record does not
    /// carry a last-modified date.
    pub fn date_field(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Opened => Some(self.opened_date),
            DateField::LastModified => self.last_modified_date,
        }
    }
}

/// Positions of the known columns within a header row.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    pub opened_date: Option<usize>,
    pub last_modified: Option<usize>,
    pub status: Option<usize>,
    pub case_owner: Option<usize>,
    pub product_line: Option<usize>,
    pub case_reason: Option<usize>,
    pub product_model: Option<usize>,
    pub case_type: Option<usize>,
}

impl HeaderMap {
    pub fn from_headers(headers: &StringRecord) -> HeaderMap {
        let mut map = HeaderMap::default();
        for (idx, name) in headers.iter().enumerate() {
            match name.trim() {
                OPENED_DATE_COLUMN => map.opened_date = Some(idx),
                LAST_MODIFIED_COLUMN => map.last_modified = Some(idx),
                STATUS_COLUMN => map.status = Some(idx),
                CASE_OWNER_COLUMN => map.case_owner = Some(idx),
                PRODUCT_LINE_COLUMN => map.product_line = Some(idx),
                CASE_REASON_COLUMN => map.case_reason = Some(idx),
                PRODUCT_MODEL_COLUMN => map.product_model = Some(idx),
                CASE_TYPE_COLUMN => map.case_type = Some(idx),
                _ => {}
            }
        }
        map
    }
}

/// Parse an input date cell, day-first convention.
///
/// Cells may carry a time component ("14/03/2024 09:30"); the time is
/// discarded. Returns `None` for empty or unrecognized values.
pub fn parse_case_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    None
}

fn cell<'r>(record: &'r StringRecord, idx: Option<usize>) -> Option<&'r str> {
    let value = record.get(idx?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl CaseRecord {
    /// Build a record from one CSV row.
    ///
    /// `row` is the 1-based data row number used in error messages. A missing
    /// or unparsable opened date is fatal; an unparsable optional date
    /// degrades to `None` (the record never matches last-modified criteria).
    pub fn from_row(
        record: &StringRecord,
        headers: &HeaderMap,
        row: usize,
    ) -> Result<CaseRecord, LoadError> {
        let opened_idx = headers.opened_date.ok_or(LoadError::MissingOpenedDate)?;
        let opened_raw = record.get(opened_idx).unwrap_or("").trim();
        let opened_date = parse_case_date(opened_raw).ok_or_else(|| LoadError::UnparsableDate {
            row,
            value: opened_raw.to_string(),
        })?;

        let last_modified_date = cell(record, headers.last_modified).and_then(parse_case_date);

        Ok(CaseRecord {
            opened_date,
            last_modified_date,
            status: cell(record, headers.status).unwrap_or("").to_string(),
            case_owner: cell(record, headers.case_owner).unwrap_or("").to_string(),
            product_line: cell(record, headers.product_line).unwrap_or("").to_string(),
            case_reason: cell(record, headers.case_reason).map(str::to_string),
            product_model: cell(record, headers.product_model).map(str::to_string),
            case_type: cell(record, headers.case_type).map(str::to_string),
        })
    }
}
