//! Full report rendering: every section written into an output directory.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use csr_analytics::aggregate::AggregateRow;
use csr_cases::config::ReportConfig;
use csr_cases::dataset::CaseData;
use csr_report::assemble::{assemble, Breakdown};
use csr_report::chart::ChartSpec;
use csr_report::export::{write_aggregate_csv, write_cases_csv, write_weekly_csv};
use csr_report::section::Section;
use log::{info, warn};
use std::path::Path;

pub fn run_report(
    input: &Path,
    out_dir: &Path,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    week_of: Option<NaiveDate>,
    current_week: bool,
) -> anyhow::Result<()> {
    let data = CaseData::from_csv_path(input)?;
    let config = ReportConfig::from_env();
    let today = Local::now().naive_local().date();
    let window = crate::resolve_window(&data, start_date, end_date, week_of, current_week, today)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    info!(
        "Report for cases opened/closed between {} and {}",
        window.start.format("%d %b, %Y"),
        window.end.format("%d %b, %Y")
    );

    let report = assemble(&data, &config, window, today);

    // weekly overview tables
    write_weekly_csv(
        &out_dir.join("weekly_opened_summary.csv"),
        "Cases Opened",
        &report.weekly.opened,
    )?;
    match &report.weekly.closed {
        Section::Ready(rows) => write_weekly_csv(
            &out_dir.join("weekly_closed_summary.csv"),
            "Cases Closed",
            rows,
        )?,
        other => note("Weekly Overview: Cases Closed", other),
    }

    // headline metrics
    println!("Total Open Cases: {}", report.period.metrics.total_open);
    println!("Of Those, Now Closed: {}", report.period.metrics.now_closed);
    println!(
        "Total Cases Closed in Period: {}",
        report.period.metrics.closed_in_period
    );

    // detailed cohort export
    write_cases_csv(
        &out_dir.join("open_in_period_detailed_report.csv"),
        &report.period.opened_cases,
    )?;

    // breakdowns of the period cohort
    export_breakdown(
        out_dir,
        "all_cases_by_product_line",
        "All Cases by Product Line",
        &report.period.opened_breakdown,
    )?;
    export_breakdown(
        out_dir,
        "closed_cases_by_product_line",
        "Closed Cases by Product Line",
        &report.period.now_closed_breakdown,
    )?;
    match &report.period.closed_in_period {
        Section::Ready(closed) => {
            write_cases_csv(
                &out_dir.join("closed_in_period_detailed_report.csv"),
                &closed.cases,
            )?;
            export_breakdown(
                out_dir,
                "closed_in_period_by_product_line",
                "Cases Closed in Period by Product Line",
                &Section::Ready(closed.breakdown.clone()),
            )?;
        }
        other => note("Breakdown of Cases Closed in Selected Period", other),
    }

    // per-product-line YTD analysis
    for analysis in &report.product_analyses {
        info!(
            "{}: {} open cases (YTD)",
            analysis.product_line, analysis.total_open
        );
        let product = analysis.product_line.replace(' ', "_");
        export_grouped(
            out_dir,
            &format!("ytd_{product}_by_model"),
            &format!("{} Breakdown by Model", analysis.product_line),
            "Product Model",
            &analysis.by_model,
        )?;
        export_grouped(
            out_dir,
            &format!("ytd_{product}_by_reason"),
            &format!("{} Breakdown by Case Reason", analysis.product_line),
            "Case Reason",
            &analysis.by_reason,
        )?;
        export_grouped(
            out_dir,
            &format!("ytd_{product}_by_owner"),
            &format!("{} Breakdown by Case Owner", analysis.product_line),
            "Case Owner",
            &analysis.by_owner,
        )?;
    }

    // YTD backlog
    match &report.backlog {
        Section::Ready(backlog) => {
            println!(
                "Total Open Cases (YTD, Filtered Owners): {}",
                backlog.cases.len()
            );
            write_cases_csv(&out_dir.join("ytd_open_case_backlog.csv"), &backlog.cases)?;
            export_rows(
                out_dir,
                "ytd_backlog_by_product",
                "Backlog by Product Line",
                "Product Line",
                &backlog.by_product_line,
            )?;
            export_grouped(
                out_dir,
                "ytd_backlog_by_model",
                "Backlog by Product Model",
                "Product Model",
                &backlog.by_model,
            )?;
            export_grouped(
                out_dir,
                "ytd_backlog_by_reason",
                "Backlog by Case Reason",
                "Case Reason",
                &backlog.by_reason,
            )?;
            export_rows(
                out_dir,
                "ytd_backlog_by_owner",
                "Backlog by Case Owner",
                "Case Owner",
                &backlog.by_owner,
            )?;
        }
        other => note("Year-to-Date Open Case Backlog Analysis", other),
    }

    // YTD trends
    crate::trends::export_trends(out_dir, &report.trends)?;

    info!("Report written to {}", out_dir.display());
    Ok(())
}

fn note<T>(title: &str, section: &Section<T>) {
    match section {
        Section::Ready(_) => {}
        Section::Skipped(notice) => warn!("{title}: {notice}"),
        Section::Empty(notice) => info!("{title}: {notice}"),
    }
}

/// Write one breakdown pair: the reason table (with grand total) and the
/// product-line table plus its pie payload.
fn export_breakdown(
    out_dir: &Path,
    stem: &str,
    title: &str,
    section: &Section<Breakdown>,
) -> anyhow::Result<()> {
    let breakdown = match section {
        Section::Ready(breakdown) => breakdown,
        other => {
            note(title, other);
            return Ok(());
        }
    };
    match &breakdown.by_reason {
        Section::Ready(rows) => write_aggregate_csv(
            &out_dir.join(format!("{stem}_by_reason.csv")),
            &["Product Line", "Case Reason"],
            rows,
        )?,
        other => note(title, other),
    }
    export_rows(out_dir, stem, title, "Product Line", &breakdown.by_product_line)
}

/// Write one grouped table and its pie payload.
fn export_rows(
    out_dir: &Path,
    stem: &str,
    title: &str,
    name_label: &str,
    rows: &[AggregateRow],
) -> anyhow::Result<()> {
    write_aggregate_csv(&out_dir.join(format!("{stem}_data.csv")), &[name_label], rows)?;
    let chart = ChartSpec::pie(title, name_label, rows);
    std::fs::write(
        out_dir.join(format!("{stem}_chart.json")),
        chart.to_json_string(),
    )?;
    Ok(())
}

fn export_grouped(
    out_dir: &Path,
    stem: &str,
    title: &str,
    name_label: &str,
    section: &Section<Vec<AggregateRow>>,
) -> anyhow::Result<()> {
    match section {
        Section::Ready(rows) => export_rows(out_dir, stem, title, name_label, rows),
        other => {
            note(title, other);
            Ok(())
        }
    }
}
