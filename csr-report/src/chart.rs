//! Chart-data payloads for an external renderer.
//!
//! The drawing surface is not part of this toolkit; each chart is emitted as
//! a JSON document carrying its kind, title, row data, and display config,
//! for whatever front end renders it.

use csr_analytics::aggregate::AggregateRow;
use csr_analytics::trend::TrendPoint;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Line,
}

/// A renderer-ready chart description.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub data: serde_json::Value,
    pub config: serde_json::Value,
}

impl ChartSpec {
    /// A pie chart over a single-dimension grouped count.
    pub fn pie(title: &str, name_label: &str, rows: &[AggregateRow]) -> ChartSpec {
        let data: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                json!({
                    "name": row.key.join(" / "),
                    "value": row.count,
                })
            })
            .collect();
        ChartSpec {
            kind: ChartKind::Pie,
            title: title.to_string(),
            data: serde_json::Value::Array(data),
            config: json!({
                "nameLabel": name_label,
                "valueLabel": "Record Count",
                "showPercent": true,
            }),
        }
    }

    /// A line chart over weekly trend points. Absent points serialize as
    /// `null` values, never zero.
    pub fn line(title: &str, y_label: &str, points: &[TrendPoint]) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Line,
            title: title.to_string(),
            data: serde_json::to_value(points).unwrap_or_default(),
            config: json!({
                "xLabel": "Week Number (Since Start of Year)",
                "yLabel": y_label,
                "markers": true,
            }),
        }
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
