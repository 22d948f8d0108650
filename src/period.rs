// Calendar helpers: month labels, quarters and the period keys used by the
// time-based reports.
//
// Month labels are the three-letter English abbreviations stored on each plan.
// Anything else is treated as an unknown period: it still counts in totals but
// has no place in the calendar.
use crate::types::Granularity;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

pub const UNKNOWN_PERIOD: &str = "Unknown";

/// Zero-based position of a month label in the calendar (`"Jan"` -> 0).
pub fn month_index(label: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == label)
}

/// Label for a one-based month number as stored in the historical archive.
pub fn month_label(number: u32) -> Option<&'static str> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

pub fn quarter_for_index(idx: usize) -> &'static str {
    match idx {
        0..=2 => "Q1",
        3..=5 => "Q2",
        6..=8 => "Q3",
        9..=11 => "Q4",
        _ => UNKNOWN_PERIOD,
    }
}

/// Quarter label for a month label, `"Unknown"` when the month is not recognised.
pub fn quarter_of(label: &str) -> &'static str {
    match month_index(label) {
        Some(idx) => quarter_for_index(idx),
        None => UNKNOWN_PERIOD,
    }
}

/// Sort rank for a monthly bucket key; unknown labels sort after December.
fn month_rank(label: &str) -> usize {
    month_index(label).unwrap_or(MONTHS.len())
}

impl Granularity {
    /// Bucket key for a plan's month field.
    ///
    /// Monthly buckets keep the literal label (so a misspelt month gets its own
    /// bucket); a missing or empty month becomes `"Unknown"`. Quarterly buckets
    /// go through [`quarter_of`].
    pub fn bucket_key(&self, month: Option<&str>) -> String {
        let month = month.filter(|m| !m.is_empty());
        match self {
            Granularity::Monthly => month.unwrap_or(UNKNOWN_PERIOD).to_string(),
            Granularity::Quarterly => month.map_or(UNKNOWN_PERIOD, quarter_of).to_string(),
        }
    }

    /// Every period of a year in calendar order.
    pub fn periods(&self) -> &'static [&'static str] {
        match self {
            Granularity::Monthly => &MONTHS,
            Granularity::Quarterly => &QUARTERS,
        }
    }

    /// Chronological comparison between two bucket keys of this granularity.
    pub fn compare_keys(&self, a: &str, b: &str) -> std::cmp::Ordering {
        match self {
            Granularity::Monthly => month_rank(a).cmp(&month_rank(b)),
            // "Q1" < "Q2" < "Q3" < "Q4" < "Unknown" lexically
            Granularity::Quarterly => a.cmp(b),
        }
    }
}
