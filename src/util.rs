// Small shared helpers: percentages, label shortening and forgiving parsers
// for the loosely typed CSV exports.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Labels longer than this are shortened for display.
pub const LABEL_MAX_CHARS: usize = 25;
/// Characters kept from a shortened label before the ellipsis.
pub const LABEL_KEEP_CHARS: usize = 22;

/// Completion rate as a whole percentage, `0` when there is nothing to complete.
pub fn rate(achieved: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_percent(achieved as f64 / total as f64 * 100.0)
}

/// Round half up and clamp into `0..=100`.
pub fn round_percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Shorten a label to 22 characters plus `...` when it is longer than 25.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-glyph.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_MAX_CHARS {
        let head: String = label.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Trimmed value of a free-text field, or `sentinel` when it is blank.
pub fn or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}

pub fn average(v: &[f64]) -> f64 {
    // Returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

pub fn format_percent(rate: Option<u32>) -> String {
    match rate {
        Some(r) => format!("{}%", r),
        None => "No data".to_string(),
    }
}

/// Trimmed, non-empty text or `None`.
pub fn non_blank(s: Option<String>) -> Option<String> {
    let s = s?.trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    // Archive exports sometimes carry a trailing percent sign.
    let s = s.trim_end_matches('%').trim();
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // Dates are expected in `YYYY-MM-DD` format.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_of_nothing_is_zero() {
        assert_eq!(rate(0, 0), 0);
        assert_eq!(rate(0, 5), 0);
        assert_eq!(rate(5, 5), 100);
    }

    #[test]
    fn rate_rounds_half_up() {
        assert_eq!(rate(2, 3), 67);
        assert_eq!(rate(1, 3), 33);
        assert_eq!(rate(1, 8), 13); // 12.5
        assert_eq!(rate(1, 200), 1); // 0.5
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(
            truncate_label("Digital Transformation Of Core Services"),
            "Digital Transformation..."
        );
        let exactly_25 = "abcdefghijklmnopqrstuvwxy";
        assert_eq!(truncate_label(exactly_25), exactly_25);
        assert_eq!(truncate_label("abcdefghijklmnopqrstuvwxyz"), "abcdefghijklmnopqrstuv...");
    }

    #[test]
    fn truncation_counts_characters() {
        let label = "é".repeat(30);
        let short = truncate_label(&label);
        assert_eq!(short.chars().count(), 25);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn blank_values_become_sentinels() {
        assert_eq!(or_sentinel(None, "Unassigned"), "Unassigned");
        assert_eq!(or_sentinel(Some("   "), "Unassigned"), "Unassigned");
        assert_eq!(or_sentinel(Some(" Budi "), "Unassigned"), "Budi");
    }

    #[test]
    fn parsers_are_forgiving() {
        assert_eq!(parse_f64_safe(Some(" 72.5 ")), Some(72.5));
        assert_eq!(parse_f64_safe(Some("80%")), Some(80.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_i32_safe(Some("2025")), Some(2025));
        assert_eq!(parse_i32_safe(Some("")), None);
        assert_eq!(parse_u32_safe(Some("-1")), None);
        assert!(parse_date_safe(Some("2026-06-15")).is_some());
        assert!(parse_date_safe(Some("15/06/2026")).is_none());
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[67.0, 73.0]), 70.0);
    }
}
