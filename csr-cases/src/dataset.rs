use crate::record::{CaseRecord, HeaderMap, LoadError};
use anyhow::Context;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::info;
use std::path::Path;

/// Which optional input columns were present in the header row.
///
/// Sections use these flags to distinguish a column that is absent (the
/// dependent section is skipped with a notice) from one whose cells happen
/// to be empty (records simply never match).
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnPresence {
    pub last_modified: bool,
    pub status: bool,
    pub case_owner: bool,
    pub product_line: bool,
    pub case_reason: bool,
    pub product_model: bool,
    pub case_type: bool,
}

/// The opened-date span of a dataset: `[earliest, latest]`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The in-memory record store: every case row from the uploaded file, plus
/// the opened-date bounds and column presence flags.
///
/// Immutable after load. Report sections derive filtered views of `records`;
/// nothing mutates the store in place.
#[derive(Debug, Clone)]
pub struct CaseData {
    pub records: Vec<CaseRecord>,
    pub columns: ColumnPresence,
    bounds: Option<DatasetBounds>,
}

impl CaseData {
    /// Parse a case export CSV.
    ///
    /// Fatal conditions: the `Opened Date` column missing from the header
    /// row, any row whose opened date fails to parse, or a malformed CSV.
    pub fn from_csv_str(text: &str) -> Result<CaseData, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Csv(e.to_string()))?;
        let header_map = HeaderMap::from_headers(headers);
        if header_map.opened_date.is_none() {
            return Err(LoadError::MissingOpenedDate);
        }

        let columns = ColumnPresence {
            last_modified: header_map.last_modified.is_some(),
            status: header_map.status.is_some(),
            case_owner: header_map.case_owner.is_some(),
            product_line: header_map.product_line.is_some(),
            case_reason: header_map.case_reason.is_some(),
            product_model: header_map.product_model.is_some(),
            case_type: header_map.case_type.is_some(),
        };

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let string_record = result.map_err(|e| LoadError::Csv(e.to_string()))?;
            records.push(CaseRecord::from_row(&string_record, &header_map, idx + 1)?);
        }

        let bounds = {
            let start = records.iter().map(|r| r.opened_date).min();
            let end = records.iter().map(|r| r.opened_date).max();
            match (start, end) {
                (Some(start), Some(end)) => Some(DatasetBounds { start, end }),
                _ => None,
            }
        };

        Ok(CaseData {
            records,
            columns,
            bounds,
        })
    }

    /// Load a case export CSV from disk.
    pub fn from_csv_path(path: &Path) -> anyhow::Result<CaseData> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let data = CaseData::from_csv_str(&text)?;
        info!(
            "Loaded {} case records from {}",
            data.records.len(),
            path.display()
        );
        Ok(data)
    }

    /// `[min, max]` over opened dates; `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DatasetBounds> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LoadError;

    const SAMPLE: &str = "\
Opened Date,Case Last Modified Date,Status,Case Owner,Product Line,Case Reason,Product Model,Type
01/01/2024,05/01/2024,New,Ana Silva,Barcode,Hardware Fault,BX-100,Support request
08/01/2024,,In Process,Ana Silva,RFID,Configuration,,Support request
20/01/2024,25/01/2024,Closed - Complete,Ana Silva,Barcode,,BX-200,RMA request
";

    #[test]
    fn test_load_basic() {
        let data = CaseData::from_csv_str(SAMPLE).unwrap();
        assert_eq!(data.len(), 3);
        assert!(data.columns.last_modified);
        assert!(data.columns.case_reason);
        let bounds = data.bounds().unwrap();
        assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        // empty cells become None, not empty strings
        assert_eq!(data.records[1].last_modified_date, None);
        assert_eq!(data.records[2].case_reason, None);
    }

    #[test]
    fn test_load_fixture() {
        let data =
            CaseData::from_csv_str(include_str!("../../fixtures/sample_cases.csv")).unwrap();
        assert_eq!(data.len(), 14);
        assert!(data.columns.status);
        assert!(data.columns.case_owner);
        assert!(data.columns.product_line);
        assert!(data.columns.case_type);
        let bounds = data.bounds().unwrap();
        assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
    }

    #[test]
    fn test_missing_opened_date_column_is_fatal() {
        let err = CaseData::from_csv_str("Status,Case Owner\nNew,Ana Silva\n").unwrap_err();
        assert_eq!(err, LoadError::MissingOpenedDate);
    }

    #[test]
    fn test_unparsable_opened_date_is_fatal() {
        let text = "Opened Date,Status\n01/01/2024,New\nbogus,New\n";
        let err = CaseData::from_csv_str(text).unwrap_err();
        assert!(matches!(err, LoadError::UnparsableDate { row: 2, .. }));
    }

    #[test]
    fn test_headers_only_dataset() {
        let data = CaseData::from_csv_str("Opened Date,Status\n").unwrap();
        assert!(data.is_empty());
        assert_eq!(data.bounds(), None);
    }

    #[test]
    fn test_absent_optional_columns() {
        let data = CaseData::from_csv_str("Opened Date\n01/01/2024\n").unwrap();
        assert!(!data.columns.last_modified);
        assert!(!data.columns.status);
        assert_eq!(data.records[0].status, "");
        assert_eq!(data.records[0].case_reason, None);
    }
}
