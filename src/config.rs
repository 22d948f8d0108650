// Command-line configuration for the report binary.
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

use crate::error::{ReportError, Result};
use crate::types::{ComparisonYear, Dimension, Granularity, ReferenceDate};
use crate::util::parse_date_safe;

#[derive(Debug, Clone, Parser)]
#[command(name = "action_plan_report", about = "Department action-plan performance reports")]
pub struct Cli {
    /// Action plan export
    #[arg(long, default_value = "action_plans.csv")]
    pub plans: PathBuf,

    /// Archived monthly completion rates
    #[arg(long, default_value = "historical_stats.csv")]
    pub historical: PathBuf,

    /// Limit the dashboard to one department code
    #[arg(long)]
    pub department: Option<String>,

    /// Dashboard year (defaults to the reference year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Benchmark year: none, prev, or a year such as 2024
    #[arg(long, default_value = "prev")]
    pub compare: ComparisonYear,

    #[arg(long, value_enum, default_value_t = Dimension::Strategy)]
    pub breakdown: Dimension,

    #[arg(long, value_enum, default_value_t = Granularity::Monthly)]
    pub granularity: Granularity,

    /// Reference date (YYYY-MM-DD) used for overdue checks; defaults to today
    #[arg(long)]
    pub today: Option<String>,

    /// Directory for the generated CSV and JSON files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn reference_date(&self) -> Result<ReferenceDate> {
        let date = match self.today.as_deref() {
            Some(raw) => parse_date_safe(Some(raw)).ok_or_else(|| ReportError::InvalidDate(raw.to_string()))?,
            None => Local::now().date_naive(),
        };
        Ok(reference_from(date))
    }
}

pub fn reference_from(date: NaiveDate) -> ReferenceDate {
    ReferenceDate { year: date.year(), month_index: date.month0() as usize }
}
