// Bottleneck radar: which departments are sitting on the most overdue plans.
use crate::departments::department_name;
use crate::period::month_index;
use crate::types::{DepartmentOverdue, Plan};
use std::collections::HashMap;

pub const TOP_DEPARTMENTS: usize = 5;
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// A plan is overdue when it is not achieved and its month lies strictly
/// before the reference month. Plans without a recognisable month never are.
pub fn is_overdue(plan: &Plan, reference_month: usize) -> bool {
    if plan.is_achieved_ignoring_case() {
        return false;
    }
    plan.month
        .as_deref()
        .and_then(month_index)
        .is_some_and(|idx| idx < reference_month)
}

/// Departments ranked by overdue plan count, at most five.
///
/// Departments with the same count keep the order in which they were first
/// seen. An empty result means nothing is overdue.
pub fn rank_bottlenecks(plans: &[Plan], reference_month: usize) -> Vec<DepartmentOverdue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for p in plans.iter().filter(|p| is_overdue(p, reference_month)) {
        let code = match p.department_code.trim() {
            "" => UNKNOWN_DEPARTMENT,
            c => c,
        };
        match index.get(code) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(code, counts.len());
                counts.push((code, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_DEPARTMENTS)
        .map(|(code, overdue)| DepartmentOverdue {
            code: code.to_string(),
            name: department_name(code).to_string(),
            overdue,
        })
        .collect()
}
