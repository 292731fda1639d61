use log::debug;
use std::collections::HashSet;

pub const OPEN_STATUSES_VAR: &str = "OPEN_STATUSES";
pub const CLOSED_STATUSES_VAR: &str = "CLOSED_STATUSES";
pub const OPEN_STATUSES_AVG_VAR: &str = "OPEN_STATUSES_AVG";
pub const SELECTED_OWNERS_VAR: &str = "SELECTED_OWNERS";
pub const BACKLOG_OWNERS_VAR: &str = "BACKLOG_OWNERS";
pub const KEY_PRODUCT_LINES_VAR: &str = "KEY_PRODUCT_LINES";
pub const EXCLUDED_CASE_TYPE_VAR: &str = "EXCLUDED_CASE_TYPE";

const DEFAULT_KEY_PRODUCT_LINES: &str = "Barcode,RFID,PRI,Reach";
const DEFAULT_EXCLUDED_CASE_TYPE: &str = "RMA request";

/// A named set of label strings used as a membership filter (statuses or
/// owners). An unset variable yields an empty set, which matches nothing
/// downstream; that produces empty sections, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSet {
    labels: HashSet<String>,
}

impl StatusSet {
    /// Parse a comma-separated list, trimming entries and dropping empties.
    pub fn parse(raw: &str) -> StatusSet {
        StatusSet {
            labels: parse_list(raw).into_iter().collect(),
        }
    }

    pub fn from_env(key: &str) -> StatusSet {
        StatusSet::parse(&std::env::var(key).unwrap_or_default())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// The union of two sets; used to select the open-plus-closed population
    /// for the resolution/age blend trend.
    pub fn union(&self, other: &StatusSet) -> StatusSet {
        StatusSet {
            labels: self.labels.union(&other.labels).cloned().collect(),
        }
    }
}

/// Parse a comma-separated list, trimming entries and dropping empties.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Externally provided report configuration.
///
/// Read from the environment exactly once, at startup, then passed by
/// reference into the filter and aggregation code. Nothing below the command
/// layer reads the environment.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub open_statuses: StatusSet,
    pub closed_statuses: StatusSet,
    pub open_statuses_avg: StatusSet,
    pub selected_owners: StatusSet,
    /// Owner scope for the YTD backlog section. Falls back to
    /// `selected_owners` when `BACKLOG_OWNERS` is unset.
    pub backlog_owners: StatusSet,
    /// Product lines driven through the per-line analysis and trend loops.
    pub key_product_lines: Vec<String>,
    /// Case type excluded from the YTD analyses.
    pub excluded_case_type: String,
}

impl ReportConfig {
    pub fn from_env() -> ReportConfig {
        let selected_owners = StatusSet::from_env(SELECTED_OWNERS_VAR);
        let backlog_owners = match std::env::var(BACKLOG_OWNERS_VAR) {
            Ok(raw) if !parse_list(&raw).is_empty() => StatusSet::parse(&raw),
            _ => selected_owners.clone(),
        };
        let key_product_lines = {
            let raw = std::env::var(KEY_PRODUCT_LINES_VAR).unwrap_or_default();
            let lines = parse_list(&raw);
            if lines.is_empty() {
                parse_list(DEFAULT_KEY_PRODUCT_LINES)
            } else {
                lines
            }
        };
        let excluded_case_type = {
            let raw = std::env::var(EXCLUDED_CASE_TYPE_VAR).unwrap_or_default();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                DEFAULT_EXCLUDED_CASE_TYPE.to_string()
            } else {
                trimmed.to_string()
            }
        };

        let config = ReportConfig {
            open_statuses: StatusSet::from_env(OPEN_STATUSES_VAR),
            closed_statuses: StatusSet::from_env(CLOSED_STATUSES_VAR),
            open_statuses_avg: StatusSet::from_env(OPEN_STATUSES_AVG_VAR),
            selected_owners,
            backlog_owners,
            key_product_lines,
            excluded_case_type,
        };
        debug!(
            "Config: {} open / {} closed / {} open-avg statuses, {} owners, {} key product lines",
            config.open_statuses.len(),
            config.closed_statuses.len(),
            config.open_statuses_avg.len(),
            config.selected_owners.len(),
            config.key_product_lines.len()
        );
        config
    }
}
