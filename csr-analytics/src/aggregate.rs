use csr_cases::record::CaseRecord;
use std::collections::HashMap;

/// Label of the synthetic total row appended to reason breakdowns.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// A groupable record dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    ProductLine,
    CaseReason,
    ProductModel,
    CaseOwner,
}

impl Dimension {
    /// Column header used in exported tables.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ProductLine => "Product Line",
            Dimension::CaseReason => "Case Reason",
            Dimension::ProductModel => "Product Model",
            Dimension::CaseOwner => "Case Owner",
        }
    }

    /// The record's value for this dimension; `None` when missing, which
    /// drops the record from groupings over the dimension.
    pub fn value<'r>(&self, record: &'r CaseRecord) -> Option<&'r str> {
        fn non_empty(value: &str) -> Option<&str> {
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
        match self {
            Dimension::ProductLine => non_empty(&record.product_line),
            Dimension::CaseReason => record.case_reason.as_deref(),
            Dimension::ProductModel => record.product_model.as_deref(),
            Dimension::CaseOwner => non_empty(&record.case_owner),
        }
    }
}

/// One row of a grouped count: the key tuple in dimension order, and the
/// number of records sharing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub key: Vec<String>,
    pub count: u32,
}

/// Group records by the given dimensions and count each group.
///
/// Rows come out in discovery order. A record missing any of the grouped
/// dimensions is omitted from the result.
pub fn group_count(records: &[&CaseRecord], dimensions: &[Dimension]) -> Vec<AggregateRow> {
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in records {
        let key: Option<Vec<String>> = dimensions
            .iter()
            .map(|dimension| dimension.value(record).map(str::to_string))
            .collect();
        let Some(key) = key else {
            continue;
        };
        match index.get(&key) {
            Some(&position) => rows[position].count += 1,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(AggregateRow { key, count: 1 });
            }
        }
    }

    rows
}

/// Append a synthetic `("Grand Total", "", ...)` row summing every group.
pub fn with_grand_total(mut rows: Vec<AggregateRow>) -> Vec<AggregateRow> {
    let width = rows.first().map(|row| row.key.len()).unwrap_or(2);
    let total: u32 = rows.iter().map(|row| row.count).sum();
    let mut key = vec![GRAND_TOTAL_LABEL.to_string()];
    key.resize(width, String::new());
    rows.push(AggregateRow { key, count: total });
    rows
}
