// CSV-backed sources for plans and archived statistics.
//
// Both files are read once into memory; the report menu then asks the sources
// for whatever slice it needs. Rows that cannot be understood are counted and
// skipped, never fatal.
use crate::error::Result;
use crate::types::{HistoricalStat, Plan, RawHistoricalRow, RawPlanRow};
use crate::util::{non_blank, parse_f64_safe, parse_i32_safe, parse_u32_safe};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info};

/// Where action plans come from.
pub trait PlanSource {
    /// All plans, or only those of one department when `department` is given.
    fn fetch_plans(&self, department: Option<&str>) -> Result<Vec<Plan>>;
}

/// Where archived monthly completion rates come from.
pub trait HistoricalSource {
    fn fetch_historical_stats(&self, year: i32, department: &str) -> Result<Vec<HistoricalStat>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CsvPlanSource {
    plans: Vec<Plan>,
}

impl CsvPlanSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let mut rdr = ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_path(path)?;
        let mut report = LoadReport::default();
        let mut plans = Vec::new();

        for result in rdr.deserialize::<RawPlanRow>() {
            report.total_rows += 1;
            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!(row = report.total_rows, error = %e, "skipping unreadable plan row");
                    report.parse_errors += 1;
                    continue;
                }
            };
            plans.push(clean_plan(row));
        }

        report.loaded_rows = plans.len();
        info!(
            path = %path.display(),
            rows = report.total_rows,
            loaded = report.loaded_rows,
            errors = report.parse_errors,
            "loaded action plans"
        );
        Ok((Self { plans }, report))
    }

    pub fn from_plans(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

fn clean_plan(row: RawPlanRow) -> Plan {
    Plan {
        department_code: row.department_code.unwrap_or_default().trim().to_string(),
        month: non_blank(row.month),
        year: parse_i32_safe(row.year.as_deref()),
        goal_strategy: row.goal_strategy,
        action_plan: row.action_plan,
        pic: row.pic,
        status: row.status.unwrap_or_default().trim().to_string(),
    }
}

impl PlanSource for CsvPlanSource {
    fn fetch_plans(&self, department: Option<&str>) -> Result<Vec<Plan>> {
        Ok(match department {
            Some(code) => self
                .plans
                .iter()
                .filter(|p| p.department_code == code)
                .cloned()
                .collect(),
            None => self.plans.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvHistoricalSource {
    stats: Vec<HistoricalStat>,
}

impl CsvHistoricalSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let mut rdr = ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_path(path)?;
        let mut report = LoadReport::default();
        let mut stats = Vec::new();

        for result in rdr.deserialize::<RawHistoricalRow>() {
            report.total_rows += 1;
            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!(row = report.total_rows, error = %e, "skipping unreadable historical row");
                    report.parse_errors += 1;
                    continue;
                }
            };
            let department_code = non_blank(row.department_code);
            let year = parse_i32_safe(row.year.as_deref());
            let month = parse_u32_safe(row.month.as_deref());
            let rate = parse_f64_safe(row.completion_rate.as_deref());
            match (department_code, year, month, rate) {
                (Some(department_code), Some(year), Some(month), Some(completion_rate)) => {
                    stats.push(HistoricalStat { department_code, year, month, completion_rate });
                }
                _ => {
                    debug!(row = report.total_rows, "skipping incomplete historical row");
                    report.parse_errors += 1;
                }
            }
        }

        report.loaded_rows = stats.len();
        info!(
            path = %path.display(),
            rows = report.total_rows,
            loaded = report.loaded_rows,
            errors = report.parse_errors,
            "loaded historical stats"
        );
        Ok((Self { stats }, report))
    }

    pub fn from_stats(stats: Vec<HistoricalStat>) -> Self {
        Self { stats }
    }
}

impl HistoricalSource for CsvHistoricalSource {
    fn fetch_historical_stats(&self, year: i32, department: &str) -> Result<Vec<HistoricalStat>> {
        Ok(self
            .stats
            .iter()
            .filter(|h| h.year == year && h.department_code == department)
            .cloned()
            .collect())
    }
}
