use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

use crate::error::ReportError;

/// One row of the action-plan export, as it appears in the CSV.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPlanRow {
    pub department_code: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub goal_strategy: Option<String>,
    pub action_plan: Option<String>,
    pub pic: Option<String>,
    pub status: Option<String>,
}

/// One row of the historical statistics archive.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHistoricalRow {
    pub department_code: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub completion_rate: Option<String>,
}

/// A department's action plan for one month.
///
/// Dimension fields are kept as entered; blank values are mapped to a
/// sentinel at aggregation time, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub department_code: String,
    pub month: Option<String>,
    pub year: Option<i32>,
    pub goal_strategy: Option<String>,
    pub action_plan: Option<String>,
    pub pic: Option<String>,
    pub status: String,
}

impl Plan {
    /// Plan year, treating a missing year as the current one.
    pub fn year_or(&self, current_year: i32) -> i32 {
        self.year.unwrap_or(current_year)
    }

    pub fn is_achieved(&self) -> bool {
        self.status == PlanStatus::Achieved.label()
    }

    pub fn is_achieved_ignoring_case(&self) -> bool {
        self.status.eq_ignore_ascii_case(PlanStatus::Achieved.label())
    }
}

/// Archived monthly completion rate for a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStat {
    pub department_code: String,
    pub year: i32,
    /// One-based month number.
    pub month: u32,
    /// Percentage in `0.0..=100.0`.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    Pending,
    OnProgress,
    Achieved,
    NotAchieved,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Pending,
        PlanStatus::OnProgress,
        PlanStatus::Achieved,
        PlanStatus::NotAchieved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "Pending",
            PlanStatus::OnProgress => "On Progress",
            PlanStatus::Achieved => "Achieved",
            PlanStatus::NotAchieved => "Not Achieved",
        }
    }

    /// Exact, case-sensitive match against the stored status text.
    pub fn from_label(label: &str) -> Option<PlanStatus> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Field used to group plans in the performance breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[value(name = "strategy")]
    Strategy,
    #[value(name = "pic")]
    ResponsibleParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Monthly,
    Quarterly,
}

/// Which year the benchmark line is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonYear {
    None,
    #[default]
    PreviousYear,
    Year(i32),
}

impl ComparisonYear {
    /// Concrete comparison year for the selected year, `None` when disabled.
    pub fn resolve(&self, selected_year: i32) -> Option<i32> {
        match self {
            ComparisonYear::None => None,
            ComparisonYear::PreviousYear => Some(selected_year - 1),
            ComparisonYear::Year(y) => Some(*y),
        }
    }
}

impl FromStr for ComparisonYear {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ComparisonYear::None),
            "prev" | "prev_year" | "previous" => Ok(ComparisonYear::PreviousYear),
            other => other
                .parse::<i32>()
                .ok()
                .filter(|y| (1000..=9999).contains(y))
                .map(ComparisonYear::Year)
                .ok_or_else(|| ReportError::InvalidComparisonYear(s.to_string())),
        }
    }
}

/// The caller's notion of "now": the current year and zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceDate {
    pub year: i32,
    pub month_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    OnTrack,
    AtRisk,
    OffTrack,
}

impl RateTier {
    pub fn from_rate(rate: u32) -> RateTier {
        if rate >= 90 {
            RateTier::OnTrack
        } else if rate >= 70 {
            RateTier::AtRisk
        } else {
            RateTier::OffTrack
        }
    }
}

impl fmt::Display for RateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RateTier::OnTrack => "On Track",
            RateTier::AtRisk => "At Risk",
            RateTier::OffTrack => "Off Track",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub achieved: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub not_achieved: usize,
    pub rate: u32,
}

impl StatusSummary {
    /// Plans that have not started or have failed.
    pub fn needs_attention(&self) -> usize {
        self.pending + self.not_achieved
    }
}

/// Totals for one group of plans (a strategy, a PIC, a month or a quarter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedBucket {
    pub key: String,
    /// Untruncated value of the first plan that landed in this bucket.
    pub full_name: String,
    pub total: usize,
    pub achieved: usize,
    pub rate: u32,
}

/// One period of the year-over-year chart. `None` means no data, not 0%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkPoint {
    pub period: String,
    pub current: Option<u32>,
    pub comparison: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentOverdue {
    pub code: String,
    pub name: String,
    pub overdue: usize,
}

/// One slice of the strategy distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub name: String,
    pub full_name: String,
    pub value: usize,
    pub percentage: u32,
}

/// Everything shown on a department dashboard for one year.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub department_code: Option<String>,
    pub department_name: String,
    pub year: i32,
    pub summary: StatusSummary,
    pub rate_tier: RateTier,
    pub needs_attention: usize,
    pub breakdown_dimension: Dimension,
    pub breakdown: Vec<AggregatedBucket>,
    pub granularity: Granularity,
    pub timeline: Vec<AggregatedBucket>,
    pub comparison_year: Option<i32>,
    pub has_comparison_data: bool,
    pub benchmark: Option<Vec<BenchmarkPoint>>,
    pub distribution: Vec<DistributionSlice>,
    pub bottlenecks: Vec<DepartmentOverdue>,
    pub plans_in_other_years: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BucketRow {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Achieved")]
    #[tabled(rename = "Achieved")]
    pub achieved: usize,
    #[serde(rename = "Rate")]
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[serde(rename = "Tier")]
    #[tabled(rename = "Tier")]
    pub tier: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BenchmarkRow {
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "Current")]
    #[tabled(rename = "Current")]
    pub current: String,
    #[serde(rename = "Comparison")]
    #[tabled(rename = "Comparison")]
    pub comparison: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BottleneckRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Department")]
    #[tabled(rename = "Department")]
    pub code: String,
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Overdue")]
    #[tabled(rename = "Overdue")]
    pub overdue: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistributionRow {
    #[serde(rename = "Strategy")]
    #[tabled(rename = "Strategy")]
    pub name: String,
    #[serde(rename = "Plans")]
    #[tabled(rename = "Plans")]
    pub value: usize,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub percentage: String,
}
