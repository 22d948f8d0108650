use crate::error::Result;
use crate::types::{
    AggregatedBucket, BenchmarkPoint, BenchmarkRow, BottleneckRow, BucketRow, DepartmentOverdue,
    DistributionRow, DistributionSlice, RateTier,
};
use crate::util::format_percent;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn bucket_rows(buckets: &[AggregatedBucket]) -> Vec<BucketRow> {
    buckets
        .iter()
        .map(|b| BucketRow {
            name: b.key.clone(),
            total: b.total,
            achieved: b.achieved,
            rate: format_percent(Some(b.rate)),
            tier: RateTier::from_rate(b.rate).to_string(),
        })
        .collect()
}

pub fn benchmark_rows(points: &[BenchmarkPoint]) -> Vec<BenchmarkRow> {
    points
        .iter()
        .map(|p| BenchmarkRow {
            period: p.period.clone(),
            current: format_percent(p.current),
            comparison: format_percent(p.comparison),
        })
        .collect()
}

pub fn bottleneck_rows(ranked: &[DepartmentOverdue]) -> Vec<BottleneckRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, d)| BottleneckRow {
            rank: idx + 1,
            code: d.code.clone(),
            name: d.name.clone(),
            overdue: d.overdue,
        })
        .collect()
}

pub fn distribution_rows(slices: &[DistributionSlice]) -> Vec<DistributionRow> {
    slices
        .iter()
        .map(|s| DistributionRow {
            name: s.name.clone(),
            value: s.value,
            percentage: format_percent(Some(s.percentage)),
        })
        .collect()
}
