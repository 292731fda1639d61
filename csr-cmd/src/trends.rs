//! Year-to-date trend exports.

use anyhow::Context;
use chrono::Local;
use csr_cases::config::ReportConfig;
use csr_cases::dataset::CaseData;
use csr_report::assemble::{ytd_trends, YtdTrends};
use csr_report::chart::ChartSpec;
use csr_report::export::write_trend_csv;
use csr_report::section::Section;
use log::{info, warn};
use std::path::Path;

/// Export the three YTD trend sections into `out_dir`.
pub fn run_trends(input: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let data = CaseData::from_csv_path(input)?;
    let config = ReportConfig::from_env();
    let today = Local::now().naive_local().date();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let trends = ytd_trends(&data, &config, today);
    export_trends(out_dir, &trends)?;

    info!("Trend exports written to {}", out_dir.display());
    Ok(())
}

/// Write the trend CSVs and line-chart payloads. Shared with the full
/// report command.
pub fn export_trends(out_dir: &Path, trends: &YtdTrends) -> anyhow::Result<()> {
    export_line(
        out_dir,
        "ytd_average_case_age",
        "Weekly Trend of Avg. Open Case Age (YTD)",
        "Average Age (Days)",
        &trends.average_age,
    )?;
    export_line(
        out_dir,
        "ytd_average_resolution_time",
        "Weekly Trend of Avg. Case Time (Open + Closed Cases)",
        "Average Time (Days)",
        &trends.resolution,
    )?;
    for product_trend in &trends.per_product_line {
        let stem = format!(
            "ytd_avg_case_age_{}",
            product_trend.product_line.replace(' ', "_")
        );
        let title = format!(
            "Average Case Age Trend (YTD) - {}",
            product_trend.product_line
        );
        export_line(
            out_dir,
            &stem,
            &title,
            "Average Age (Days)",
            &product_trend.points,
        )?;
    }
    Ok(())
}

fn export_line(
    out_dir: &Path,
    stem: &str,
    title: &str,
    y_label: &str,
    section: &Section<Vec<csr_analytics::trend::TrendPoint>>,
) -> anyhow::Result<()> {
    match section {
        Section::Ready(points) => {
            write_trend_csv(&out_dir.join(format!("{stem}_data.csv")), y_label, points)?;
            let chart = ChartSpec::line(title, y_label, points);
            std::fs::write(
                out_dir.join(format!("{stem}_chart.json")),
                chart.to_json_string(),
            )?;
        }
        Section::Skipped(notice) => warn!("{title}: {notice}"),
        Section::Empty(notice) => info!("{title}: {notice}"),
    }
    Ok(())
}
