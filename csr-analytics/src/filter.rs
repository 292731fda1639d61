use chrono::NaiveDate;
use csr_cases::config::StatusSet;
use csr_cases::record::CaseRecord;

/// A conjunction of filter criteria over case records.
///
/// Criteria are ANDed; an empty filter passes every record. A record missing
/// an optional field fails any criterion that references that field. The
/// input collection is never mutated; `apply` returns a fresh view of
/// references into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFilter<'a> {
    status_in: Option<&'a StatusSet>,
    owner_in: Option<&'a StatusSet>,
    product_line: Option<&'a str>,
    product_line_in: Option<&'a [String]>,
    type_not: Option<&'a str>,
    opened_range: Option<(NaiveDate, NaiveDate)>,
    modified_range: Option<(NaiveDate, NaiveDate)>,
}

impl<'a> CaseFilter<'a> {
    pub fn new() -> CaseFilter<'a> {
        CaseFilter::default()
    }

    pub fn status_in(mut self, statuses: &'a StatusSet) -> Self {
        self.status_in = Some(statuses);
        self
    }

    pub fn owner_in(mut self, owners: &'a StatusSet) -> Self {
        self.owner_in = Some(owners);
        self
    }

    pub fn product_line(mut self, line: &'a str) -> Self {
        self.product_line = Some(line);
        self
    }

    pub fn product_line_in(mut self, lines: &'a [String]) -> Self {
        self.product_line_in = Some(lines);
        self
    }

    /// Exclude records of the given case type. A record with no type also
    /// fails this criterion.
    pub fn type_not(mut self, case_type: &'a str) -> Self {
        self.type_not = Some(case_type);
        self
    }

    pub fn opened_between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.opened_range = Some((start, end));
        self
    }

    pub fn opened_since(self, start: NaiveDate) -> Self {
        self.opened_between(start, NaiveDate::MAX)
    }

    pub fn modified_between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.modified_range = Some((start, end));
        self
    }

    pub fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(statuses) = self.status_in {
            if !statuses.contains(&record.status) {
                return false;
            }
        }
        if let Some(owners) = self.owner_in {
            if !owners.contains(&record.case_owner) {
                return false;
            }
        }
        if let Some(line) = self.product_line {
            if record.product_line != line {
                return false;
            }
        }
        if let Some(lines) = self.product_line_in {
            if !lines.iter().any(|line| *line == record.product_line) {
                return false;
            }
        }
        if let Some(excluded) = self.type_not {
            match &record.case_type {
                Some(case_type) => {
                    if case_type == excluded {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some((start, end)) = self.opened_range {
            if record.opened_date < start || record.opened_date > end {
                return false;
            }
        }
        if let Some((start, end)) = self.modified_range {
            match record.last_modified_date {
                Some(date) => {
                    if date < start || date > end {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    pub fn apply<'r>(&self, records: &'r [CaseRecord]) -> Vec<&'r CaseRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<CaseRecord> {
        vec![
            CaseRecord {
                opened_date: ymd(2024, 1, 1),
                last_modified_date: Some(ymd(2024, 1, 5)),
                status: "New".to_string(),
                case_owner: "Ana Silva".to_string(),
                product_line: "Barcode".to_string(),
                case_reason: Some("Hardware Fault".to_string()),
                product_model: Some("BX-100".to_string()),
                case_type: Some("Support request".to_string()),
            },
            CaseRecord {
                opened_date: ymd(2024, 2, 10),
                last_modified_date: None,
                status: "In Process".to_string(),
                case_owner: "Raj Patel".to_string(),
                product_line: "RFID".to_string(),
                case_reason: None,
                product_model: None,
                case_type: None,
            },
            CaseRecord {
                opened_date: ymd(2024, 3, 20),
                last_modified_date: Some(ymd(2024, 3, 25)),
                status: "Closed - Complete".to_string(),
                case_owner: "Ana Silva".to_string(),
                product_line: "Barcode".to_string(),
                case_reason: Some("Configuration".to_string()),
                product_model: Some("BX-200".to_string()),
                case_type: Some("RMA request".to_string()),
            },
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = records();
        let filtered = CaseFilter::new().apply(&records);
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_criteria_are_anded() {
        let records = records();
        let statuses = StatusSet::parse("New,In Process");
        let filtered = CaseFilter::new()
            .status_in(&statuses)
            .product_line("Barcode")
            .apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].status, "New");
    }

    #[test]
    fn test_empty_status_set_matches_nothing() {
        let records = records();
        let statuses = StatusSet::parse("");
        assert!(CaseFilter::new().status_in(&statuses).apply(&records).is_empty());
    }

    #[test]
    fn test_absent_field_is_a_non_match() {
        let records = records();
        // the RFID record has no type: excluded by a type criterion
        let filtered = CaseFilter::new().type_not("RMA request").apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_line, "Barcode");
        assert_eq!(filtered[0].status, "New");

        // the RFID record has no last-modified date: excluded by a date criterion
        let filtered = CaseFilter::new()
            .modified_between(ymd(2024, 1, 1), ymd(2024, 12, 31))
            .apply(&records);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_date_ranges_are_inclusive() {
        let records = records();
        let filtered = CaseFilter::new()
            .opened_between(ymd(2024, 1, 1), ymd(2024, 2, 10))
            .apply(&records);
        assert_eq!(filtered.len(), 2);

        let filtered = CaseFilter::new().opened_since(ymd(2024, 2, 10)).apply(&records);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_product_line_set_membership() {
        let records = records();
        let lines = vec!["Barcode".to_string(), "PRI".to_string()];
        let filtered = CaseFilter::new().product_line_in(&lines).apply(&records);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = records();
        let before = records.clone();
        let statuses = StatusSet::parse("New");
        let _ = CaseFilter::new().status_in(&statuses).apply(&records);
        assert_eq!(records, before);
    }
}
