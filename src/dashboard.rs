//! Department dashboard assembly.
//!
//! Fetches the plan collection and, when a comparison year is selected, the
//! archived stats for that year, then runs every report over them.

use tracing::{debug, info};

use crate::benchmark::{compose_benchmark, has_comparison_data};
use crate::bottleneck::rank_bottlenecks;
use crate::departments::department_name;
use crate::error::Result;
use crate::loader::{HistoricalSource, PlanSource};
use crate::reports::{breakdown, plans_for_year, status_summary, strategy_distribution, timeline};
use crate::types::{ComparisonYear, Dashboard, Dimension, Granularity, HistoricalStat, Plan, RateTier, ReferenceDate};

/// Selections that shape one dashboard.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Department scope; `None` covers every department.
    pub department: Option<String>,
    pub year: i32,
    pub reference: ReferenceDate,
    pub dimension: Dimension,
    pub granularity: Granularity,
    pub comparison: ComparisonYear,
}

pub fn build_dashboard(
    request: &DashboardRequest,
    plans: &dyn PlanSource,
    history: &dyn HistoricalSource,
) -> Result<Dashboard> {
    let department = request.department.as_deref();
    let all_plans = plans.fetch_plans(department)?;

    let historical = match (request.comparison.resolve(request.year), department) {
        (Some(year), Some(code)) => history.fetch_historical_stats(year, code)?,
        (Some(year), None) => {
            debug!(year, "archived stats are per department, none used for an unscoped dashboard");
            Vec::new()
        }
        (None, _) => Vec::new(),
    };

    let dashboard = assemble_dashboard(request, &all_plans, &historical);
    info!(
        department = department.unwrap_or("all"),
        year = request.year,
        plans = dashboard.summary.total,
        rate = dashboard.summary.rate,
        "built dashboard"
    );
    Ok(dashboard)
}

/// Run every report over already-fetched inputs.
///
/// `historical` must already be scoped to the comparison year.
pub fn assemble_dashboard(
    request: &DashboardRequest,
    all_plans: &[Plan],
    historical: &[HistoricalStat],
) -> Dashboard {
    let current_year = request.reference.year;
    let year_plans = plans_for_year(all_plans, request.year, current_year);
    let summary = status_summary(&year_plans);

    let comparison_year = request.comparison.resolve(request.year);
    let (benchmark, has_comparison) = match comparison_year {
        Some(year) => {
            let comparison_plans = plans_for_year(all_plans, year, current_year);
            let points = compose_benchmark(&year_plans, &comparison_plans, historical, request.granularity);
            (Some(points), has_comparison_data(&comparison_plans, historical))
        }
        None => (None, false),
    };

    Dashboard {
        department_code: request.department.clone(),
        department_name: request
            .department
            .as_deref()
            .map_or("All Departments", department_name)
            .to_string(),
        year: request.year,
        summary,
        rate_tier: RateTier::from_rate(summary.rate),
        needs_attention: summary.needs_attention(),
        breakdown_dimension: request.dimension,
        breakdown: breakdown(&year_plans, request.dimension),
        granularity: request.granularity,
        timeline: timeline(&year_plans, request.granularity),
        comparison_year,
        has_comparison_data: has_comparison,
        benchmark,
        distribution: strategy_distribution(&year_plans),
        bottlenecks: rank_bottlenecks(&year_plans, request.reference.month_index),
        plans_in_other_years: all_plans.len() - year_plans.len(),
    }
}
