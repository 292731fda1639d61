//! Weekly overview tables printed to the terminal.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use csr_cases::config::ReportConfig;
use csr_cases::dataset::CaseData;
use csr_report::assemble::{weekly_overview, WeeklyCountRow};
use csr_report::export::write_weekly_csv;
use csr_report::section::Section;
use log::warn;
use std::path::Path;

pub fn run_overview(
    input: &Path,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    week_of: Option<NaiveDate>,
    current_week: bool,
    out_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let data = CaseData::from_csv_path(input)?;
    let config = ReportConfig::from_env();
    let today = Local::now().naive_local().date();
    let window = crate::resolve_window(&data, start_date, end_date, week_of, current_week, today)?;

    let overview = weekly_overview(&data, &config, &window);

    println!(
        "Report window: {} to {}",
        window.start.format("%d %b, %Y"),
        window.end.format("%d %b, %Y")
    );
    println!();
    print_table("Weekly Overview: Cases Opened", &overview.opened);
    println!();
    match &overview.closed {
        Section::Ready(rows) => print_table("Weekly Overview: Cases Closed", rows),
        other => {
            if let Some(notice) = other.notice() {
                println!("Weekly Overview: Cases Closed: {notice}");
            }
        }
    }

    if let Some(out_dir) = out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
        write_weekly_csv(
            &out_dir.join("weekly_opened_summary.csv"),
            "Cases Opened",
            &overview.opened,
        )?;
        match &overview.closed {
            Section::Ready(rows) => write_weekly_csv(
                &out_dir.join("weekly_closed_summary.csv"),
                "Cases Closed",
                rows,
            )?,
            other => {
                if let Some(notice) = other.notice() {
                    warn!("weekly closed summary not written: {notice}");
                }
            }
        }
    }

    Ok(())
}

fn print_table(title: &str, rows: &[WeeklyCountRow]) {
    println!("{title}");
    for row in rows {
        println!("  {:>5}  {}", row.count, row.label);
    }
}
