//! Year-over-year benchmark series.
//!
//! The current year is always computed from live plans. The comparison year
//! is read from two tiers: live plans first, and the historical archive only
//! for periods where the comparison year has no live plans at all.

use std::collections::HashMap;

use tracing::debug;

use crate::period::{month_label, quarter_of};
use crate::types::{BenchmarkPoint, Granularity, HistoricalStat, Plan};
use crate::util::{average, rate, round_percent};

/// Two-tier period -> rate table: `primary` wins, `fallback` fills the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodLookup {
    primary: HashMap<String, u32>,
    fallback: HashMap<String, u32>,
}

impl PeriodLookup {
    pub fn new(primary: HashMap<String, u32>, fallback: HashMap<String, u32>) -> Self {
        Self { primary, fallback }
    }

    pub fn resolve(&self, period: &str) -> Option<u32> {
        self.primary
            .get(period)
            .or_else(|| self.fallback.get(period))
            .copied()
    }
}

/// Rate per period for the periods that have at least one plan.
pub fn live_rates(plans: &[Plan], granularity: Granularity) -> HashMap<String, u32> {
    let mut tally: HashMap<String, (usize, usize)> = HashMap::new();
    for p in plans {
        let e = tally.entry(granularity.bucket_key(p.month.as_deref())).or_default();
        e.0 += 1;
        if p.is_achieved() {
            e.1 += 1;
        }
    }
    tally
        .into_iter()
        .filter(|(_, (total, _))| *total > 0)
        .map(|(period, (total, achieved))| (period, rate(achieved, total)))
        .collect()
}

/// Archived rates per period.
///
/// Monthly periods take the archived value directly (a later record for the
/// same month replaces an earlier one). Quarterly periods average every
/// archived month in the quarter and round once. Records whose month number is
/// outside 1..=12 are ignored.
pub fn historical_rates(stats: &[HistoricalStat], granularity: Granularity) -> HashMap<String, u32> {
    let mut by_period: HashMap<String, Vec<f64>> = HashMap::new();
    for h in stats {
        let Some(month) = month_label(h.month) else {
            debug!(month = h.month, year = h.year, "ignoring historical stat with invalid month");
            continue;
        };
        let period = match granularity {
            Granularity::Monthly => month,
            Granularity::Quarterly => quarter_of(month),
        };
        let rates = by_period.entry(period.to_string()).or_default();
        if granularity == Granularity::Monthly {
            rates.clear();
        }
        rates.push(h.completion_rate);
    }
    by_period
        .into_iter()
        .filter(|(_, rates)| !rates.is_empty())
        .map(|(period, rates)| (period, round_percent(average(&rates))))
        .collect()
}

/// True when either comparison source has anything to draw.
pub fn has_comparison_data(comparison_plans: &[Plan], historical: &[HistoricalStat]) -> bool {
    !comparison_plans.is_empty() || !historical.is_empty()
}

/// One point per canonical period (12 months or 4 quarters), in calendar order.
///
/// `historical` must already be scoped to the comparison year and department.
pub fn compose_benchmark(
    current_plans: &[Plan],
    comparison_plans: &[Plan],
    historical: &[HistoricalStat],
    granularity: Granularity,
) -> Vec<BenchmarkPoint> {
    let current = live_rates(current_plans, granularity);
    let comparison = PeriodLookup::new(
        live_rates(comparison_plans, granularity),
        historical_rates(historical, granularity),
    );
    granularity
        .periods()
        .iter()
        .map(|period| BenchmarkPoint {
            period: period.to_string(),
            current: current.get(*period).copied(),
            comparison: comparison.resolve(period),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(month: &str, status: &str) -> Plan {
        Plan { department_code: "HR".into(), month: Some(month.into()), status: status.into(), ..Default::default() }
    }

    fn stat(month: u32, completion_rate: f64) -> HistoricalStat {
        HistoricalStat { department_code: "HR".into(), year: 2025, month, completion_rate }
    }

    fn point<'a>(points: &'a [BenchmarkPoint], period: &str) -> &'a BenchmarkPoint {
        points.iter().find(|p| p.period == period).unwrap()
    }

    #[test]
    fn lookup_prefers_primary() {
        let lookup = PeriodLookup::new(
            HashMap::from([("Jan".to_string(), 100)]),
            HashMap::from([("Jan".to_string(), 40), ("Feb".to_string(), 55)]),
        );
        assert_eq!(lookup.resolve("Jan"), Some(100));
        assert_eq!(lookup.resolve("Feb"), Some(55));
        assert_eq!(lookup.resolve("Mar"), None);
    }

    #[test]
    fn live_comparison_beats_history() {
        let points = compose_benchmark(&[], &[plan("Mar", "Achieved")], &[stat(3, 40.0)], Granularity::Monthly);
        assert_eq!(
            point(&points, "Mar"),
            &BenchmarkPoint { period: "Mar".into(), current: None, comparison: Some(100) }
        );
    }

    #[test]
    fn history_fills_missing_periods() {
        let points = compose_benchmark(
            &[plan("Jan", "Achieved"), plan("Jan", "Pending")],
            &[],
            &[stat(2, 72.6)],
            Granularity::Monthly,
        );
        assert_eq!(point(&points, "Jan").current, Some(50));
        assert_eq!(point(&points, "Jan").comparison, None);
        assert_eq!(point(&points, "Feb").comparison, Some(73));
    }

    #[test]
    fn every_period_is_emitted_in_order() {
        let points = compose_benchmark(&[], &[], &[], Granularity::Monthly);
        let periods: Vec<&str> = points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, crate::period::MONTHS.to_vec());
        assert!(points.iter().all(|p| p.current.is_none() && p.comparison.is_none()));

        let points = compose_benchmark(&[], &[], &[], Granularity::Quarterly);
        let periods: Vec<&str> = points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn zero_percent_is_not_missing() {
        let points = compose_benchmark(&[plan("Apr", "Pending")], &[], &[], Granularity::Monthly);
        assert_eq!(point(&points, "Apr").current, Some(0));
        assert_eq!(point(&points, "May").current, None);
    }

    #[test]
    fn quarterly_history_averages_available_months() {
        let points = compose_benchmark(&[], &[], &[stat(4, 67.0), stat(6, 73.0)], Granularity::Quarterly);
        assert_eq!(point(&points, "Q2").comparison, Some(70));
        assert_eq!(point(&points, "Q1").comparison, None);
    }

    #[test]
    fn quarterly_average_rounds_once() {
        // raw mean 70.73 -> 71; rounding each month first would give 70
        let rates = historical_rates(&[stat(1, 70.4), stat(2, 70.4), stat(3, 71.4)], Granularity::Quarterly);
        assert_eq!(rates.get("Q1"), Some(&71));
    }

    #[test]
    fn quarterly_live_comparison_beats_history() {
        let points = compose_benchmark(
            &[],
            &[plan("May", "Pending"), plan("Jun", "Achieved")],
            &[stat(4, 90.0)],
            Granularity::Quarterly,
        );
        assert_eq!(point(&points, "Q2").comparison, Some(50));
    }

    #[test]
    fn later_monthly_record_wins_and_bad_months_are_ignored() {
        let rates = historical_rates(&[stat(5, 10.0), stat(5, 60.0), stat(0, 99.0), stat(13, 99.0)], Granularity::Monthly);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("May"), Some(&60));
    }

    #[test]
    fn unknown_months_never_reach_the_chart() {
        let points = compose_benchmark(&[plan("Mayy", "Achieved")], &[], &[], Granularity::Monthly);
        assert!(points.iter().all(|p| p.current.is_none()));
    }

    #[test]
    fn comparison_data_flag() {
        assert!(!has_comparison_data(&[], &[]));
        assert!(has_comparison_data(&[], &[stat(1, 50.0)]));
        assert!(has_comparison_data(&[plan("Jan", "Pending")], &[]));
    }
}
