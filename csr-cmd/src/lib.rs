//! Command implementations for the case reporting CLI.
//!
//! Provides subcommands for rendering the full report, printing the weekly
//! overview tables, and exporting the year-to-date trend sections.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use csr_analytics::window::TimeWindow;
use csr_cases::dataset::CaseData;
use std::path::PathBuf;

pub mod overview;
pub mod report;
pub mod trends;

#[derive(Subcommand)]
pub enum Command {
    /// Render every report section into an output directory
    Report {
        /// Path to the case export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the CSV tables and chart payloads
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Range mode: start date (YYYY-MM-DD); defaults to the earliest opened date
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Range mode: end date (YYYY-MM-DD); defaults to the latest opened date
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Week mode: report on the Monday-to-Sunday week containing this date
        #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
        week_of: Option<NaiveDate>,

        /// Week mode: report on the current week (or the dataset's first week
        /// when today is outside its bounds)
        #[arg(long, conflicts_with_all = ["start_date", "end_date", "week_of"])]
        current_week: bool,
    },

    /// Print the weekly opened/closed overview tables
    Overview {
        /// Path to the case export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Range mode: start date (YYYY-MM-DD); defaults to the earliest opened date
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Range mode: end date (YYYY-MM-DD); defaults to the latest opened date
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Week mode: report on the Monday-to-Sunday week containing this date
        #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
        week_of: Option<NaiveDate>,

        /// Week mode: report on the current week
        #[arg(long, conflicts_with_all = ["start_date", "end_date", "week_of"])]
        current_week: bool,

        /// Also write the overview tables as CSV into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Export the year-to-date trend sections (independent of any window)
    Trends {
        /// Path to the case export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the trend CSVs and chart payloads
        #[arg(short, long)]
        out_dir: PathBuf,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Report {
            input,
            out_dir,
            start_date,
            end_date,
            week_of,
            current_week,
        } => report::run_report(&input, &out_dir, start_date, end_date, week_of, current_week),
        Command::Overview {
            input,
            start_date,
            end_date,
            week_of,
            current_week,
            out_dir,
        } => overview::run_overview(
            &input,
            start_date,
            end_date,
            week_of,
            current_week,
            out_dir.as_deref(),
        ),
        Command::Trends { input, out_dir } => trends::run_trends(&input, &out_dir),
    }
}

/// Resolve the active window from the CLI arguments.
///
/// `--week-of`/`--current-week` select week mode; otherwise range mode with
/// the dataset bounds as defaults. An empty dataset cannot produce a window.
pub(crate) fn resolve_window(
    data: &CaseData,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    week_of: Option<NaiveDate>,
    current_week: bool,
    today: NaiveDate,
) -> anyhow::Result<TimeWindow> {
    let bounds = data
        .bounds()
        .context("dataset is empty: no case records to report on")?;
    if current_week || week_of.is_some() {
        Ok(TimeWindow::week_of(week_of, bounds, today))
    } else {
        let start = start_date.unwrap_or(bounds.start);
        let end = end_date.unwrap_or(bounds.end);
        Ok(TimeWindow::range(start, end, bounds)?)
    }
}
