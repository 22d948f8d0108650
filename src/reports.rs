use crate::types::{AggregatedBucket, Dimension, DistributionSlice, Granularity, Plan, PlanStatus, StatusSummary};
use crate::util::{or_sentinel, rate, truncate_label};
use std::collections::HashMap;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNASSIGNED: &str = "Unassigned";

/// Slices shown individually before the rest are folded into "Others".
const DISTRIBUTION_TOP: usize = 5;
const DISTRIBUTION_MAX_SLICES: usize = 6;

/// Plans belonging to `year`; plans without a year count as `current_year`.
pub fn plans_for_year(plans: &[Plan], year: i32, current_year: i32) -> Vec<Plan> {
    plans
        .iter()
        .filter(|p| p.year_or(current_year) == year)
        .cloned()
        .collect()
}

/// Years offered by the year selector, newest first.
pub fn available_years(current_year: i32) -> [i32; 3] {
    [current_year, current_year - 1, current_year - 2]
}

pub fn status_summary(plans: &[Plan]) -> StatusSummary {
    let mut s = StatusSummary { total: plans.len(), ..Default::default() };
    for p in plans {
        match PlanStatus::from_label(&p.status) {
            Some(PlanStatus::Achieved) => s.achieved += 1,
            Some(PlanStatus::OnProgress) => s.in_progress += 1,
            Some(PlanStatus::Pending) => s.pending += 1,
            Some(PlanStatus::NotAchieved) => s.not_achieved += 1,
            None => {}
        }
    }
    s.rate = rate(s.achieved, s.total);
    s
}

/// Group plans into buckets, keeping buckets in first-seen order.
///
/// `key_of` returns the bucket key and the untruncated name behind it.
fn group_plans<F>(plans: &[Plan], key_of: F) -> Vec<AggregatedBucket>
where
    F: Fn(&Plan) -> (String, String),
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<AggregatedBucket> = Vec::new();
    for p in plans {
        let (key, full_name) = key_of(p);
        let i = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(AggregatedBucket { key, full_name, total: 0, achieved: 0, rate: 0 });
            buckets.len() - 1
        });
        let b = &mut buckets[i];
        b.total += 1;
        if p.is_achieved() {
            b.achieved += 1;
        }
    }
    for b in &mut buckets {
        b.rate = rate(b.achieved, b.total);
    }
    buckets
}

fn dimension_value(plan: &Plan, dimension: Dimension) -> String {
    match dimension {
        Dimension::Strategy => or_sentinel(plan.goal_strategy.as_deref(), UNCATEGORIZED),
        Dimension::ResponsibleParty => or_sentinel(plan.pic.as_deref(), UNASSIGNED),
    }
}

/// Completion rate per strategy or per PIC, best performers first.
///
/// Groups are keyed by the shortened display label, so two long values that
/// share their first 22 characters end up in the same bucket. Equal rates keep
/// the order in which their groups first appeared.
pub fn breakdown(plans: &[Plan], dimension: Dimension) -> Vec<AggregatedBucket> {
    let mut rows = group_plans(plans, |p| {
        let full = dimension_value(p, dimension);
        (truncate_label(&full), full)
    });
    rows.sort_by(|a, b| b.rate.cmp(&a.rate));
    rows
}

/// Completion rate per month or quarter in calendar order.
pub fn timeline(plans: &[Plan], granularity: Granularity) -> Vec<AggregatedBucket> {
    let mut rows = group_plans(plans, |p| {
        let key = granularity.bucket_key(p.month.as_deref());
        (key.clone(), key)
    });
    rows.sort_by(|a, b| granularity.compare_keys(&a.key, &b.key));
    rows
}

/// Share of plans per strategy, largest first, long tails folded into "Others".
pub fn strategy_distribution(plans: &[Plan]) -> Vec<DistributionSlice> {
    if plans.is_empty() {
        return Vec::new();
    }
    let total = plans.len();
    let share = |count: usize| rate(count, total);

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in plans {
        let strategy = dimension_value(p, Dimension::Strategy);
        match index.get(&strategy) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(strategy.clone(), counts.len());
                counts.push((strategy, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut slices: Vec<DistributionSlice> = counts
        .into_iter()
        .map(|(full_name, value)| DistributionSlice {
            name: truncate_label(&full_name),
            full_name,
            value,
            percentage: share(value),
        })
        .collect();
    if slices.len() <= DISTRIBUTION_MAX_SLICES {
        return slices;
    }

    let others = slices.split_off(DISTRIBUTION_TOP);
    let others_total: usize = others.iter().map(|s| s.value).sum();
    slices.push(DistributionSlice {
        name: "Others".to_string(),
        full_name: format!("Others ({} strategies)", others.len()),
        value: others_total,
        percentage: share(others_total),
    });
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(strategy: &str, pic: &str, month: &str, status: &str) -> Plan {
        Plan {
            department_code: "HR".into(),
            month: Some(month.into()),
            year: Some(2026),
            goal_strategy: Some(strategy.into()),
            action_plan: None,
            pic: Some(pic.into()),
            status: status.into(),
        }
    }

    #[test]
    fn all_achieved_summary() {
        let plans: Vec<Plan> = (0..4).map(|_| plan("S", "P", "Jan", "Achieved")).collect();
        let s = status_summary(&plans);
        assert_eq!(
            s,
            StatusSummary { total: 4, achieved: 4, in_progress: 0, pending: 0, not_achieved: 0, rate: 100 }
        );
    }

    #[test]
    fn summary_counts_each_status_exactly() {
        let plans = vec![
            plan("S", "P", "Jan", "Achieved"),
            plan("S", "P", "Jan", "achieved"),
            plan("S", "P", "Jan", "On Progress"),
            plan("S", "P", "Jan", "Pending"),
            plan("S", "P", "Jan", "Not Achieved"),
        ];
        let s = status_summary(&plans);
        assert_eq!(s.total, 5);
        assert_eq!(s.achieved, 1);
        assert_eq!(s.in_progress, 1);
        assert_eq!(s.pending, 1);
        assert_eq!(s.not_achieved, 1);
        assert_eq!(s.rate, 20);
        assert_eq!(s.needs_attention(), 2);
    }

    #[test]
    fn empty_inputs_give_empty_results() {
        assert_eq!(status_summary(&[]), StatusSummary::default());
        assert!(breakdown(&[], Dimension::Strategy).is_empty());
        assert!(timeline(&[], Granularity::Monthly).is_empty());
        assert!(strategy_distribution(&[]).is_empty());
    }

    #[test]
    fn breakdown_truncates_and_uses_sentinels() {
        let long = "Digital Transformation Of Core Services";
        let plans = vec![
            plan(long, "A", "Jan", "Achieved"),
            plan(long, "A", "Feb", "Achieved"),
            plan(long, "A", "Mar", "Pending"),
            plan("  ", "A", "Mar", "Pending"),
        ];
        let rows = breakdown(&plans, Dimension::Strategy);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Digital Transformation...");
        assert_eq!(rows[0].full_name, long);
        assert_eq!((rows[0].total, rows[0].achieved, rows[0].rate), (3, 2, 67));
        assert_eq!(rows[1].key, UNCATEGORIZED);
        assert_eq!((rows[1].total, rows[1].achieved, rows[1].rate), (1, 0, 0));
    }

    #[test]
    fn shared_prefixes_collapse_into_one_bucket() {
        let plans = vec![
            plan("Customer Experience Program North", "A", "Jan", "Achieved"),
            plan("Customer Experience Program South", "A", "Jan", "Pending"),
        ];
        let rows = breakdown(&plans, Dimension::Strategy);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].full_name, "Customer Experience Program North");
    }

    #[test]
    fn breakdown_ties_keep_first_seen_order() {
        let plans = vec![
            plan("S", "Citra", "Jan", "Pending"),
            plan("S", "Budi", "Jan", "Achieved"),
            plan("S", "Andi", "Jan", "Pending"),
            plan("S", "", "Jan", "Achieved"),
        ];
        let rows = breakdown(&plans, Dimension::ResponsibleParty);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Budi", UNASSIGNED, "Citra", "Andi"]);
    }

    #[test]
    fn monthly_timeline_is_chronological_with_unknown_last() {
        let mut plans = vec![
            plan("S", "P", "Mar", "Achieved"),
            plan("S", "P", "Jan", "Pending"),
            plan("S", "P", "Dec", "Achieved"),
        ];
        plans.push(Plan { month: None, ..plan("S", "P", "", "Achieved") });
        plans.push(plan("S", "P", "Jan", "Achieved"));
        let rows = timeline(&plans, Granularity::Monthly);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Jan", "Mar", "Dec", "Unknown"]);
        assert_eq!((rows[0].total, rows[0].achieved, rows[0].rate), (2, 1, 50));
    }

    #[test]
    fn quarterly_timeline_groups_months() {
        let plans = vec![
            plan("S", "P", "Nov", "Achieved"),
            plan("S", "P", "Feb", "Achieved"),
            plan("S", "P", "Mar", "Pending"),
            plan("S", "P", "Smarch", "Pending"),
        ];
        let rows = timeline(&plans, Granularity::Quarterly);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Q1", "Q4", "Unknown"]);
        assert_eq!(rows[0].rate, 50);
    }

    #[test]
    fn year_filter_defaults_missing_years() {
        let mut undated = plan("S", "P", "Jan", "Pending");
        undated.year = None;
        let mut old = plan("S", "P", "Jan", "Pending");
        old.year = Some(2024);
        let plans = vec![undated, old, plan("S", "P", "Jan", "Pending")];
        assert_eq!(plans_for_year(&plans, 2026, 2026).len(), 2);
        assert_eq!(plans_for_year(&plans, 2024, 2026).len(), 1);
        assert_eq!(available_years(2026), [2026, 2025, 2024]);
    }

    #[test]
    fn distribution_folds_the_tail() {
        let mut plans = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            for _ in 0..(7 - i) {
                plans.push(plan(name, "P", "Jan", "Pending"));
            }
        }
        let slices = strategy_distribution(&plans);
        assert_eq!(slices.len(), 6);
        assert_eq!(slices[0].name, "A");
        assert_eq!(slices[0].value, 7);
        let others = &slices[5];
        assert_eq!(others.name, "Others");
        assert_eq!(others.full_name, "Others (2 strategies)");
        assert_eq!(others.value, 3);
        assert_eq!(others.percentage, 11); // 3 of 28
    }

    #[test]
    fn distribution_keeps_six_slices_whole() {
        let plans: Vec<Plan> = ["A", "B", "C", "D", "E", ""]
            .iter()
            .map(|s| plan(s, "P", "Jan", "Pending"))
            .collect();
        let slices = strategy_distribution(&plans);
        assert_eq!(slices.len(), 6);
        assert_eq!(slices[5].name, UNCATEGORIZED);
        assert_eq!(slices[0].percentage, 17);
    }
}
