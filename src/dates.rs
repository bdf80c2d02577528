//! Deadline parsing and display helpers.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{DashResult, DashboardError};

/// Parse a deadline typed into a form or passed on the command line.
///
/// Accepts `YYYY-MM-DD` plus a few shorthands relative to `today`:
/// `today`, `tomorrow`, `in 3d`, `in 2w` and `eom` (end of month).
pub fn parse_deadline(input: &str, today: NaiveDate) -> DashResult<NaiveDate> {
    let s = input.trim().to_lowercase();

    match s.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "eom" | "end of month" => return end_of_month(today).ok_or_else(|| DashboardError::InvalidDate(input.to_string())),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let offset = if let Some(n) = rest.strip_suffix('d').and_then(|n| n.trim().parse::<i64>().ok()) {
            Some(Duration::try_days(n))
        } else {
            rest.strip_suffix('w')
                .and_then(|n| n.trim().parse::<i64>().ok())
                .map(Duration::try_weeks)
        };
        if let Some(offset) = offset {
            // Offsets past chrono's date range are rejected, not wrapped.
            return offset
                .and_then(|d| today.checked_add_signed(d))
                .ok_or_else(|| DashboardError::InvalidDate(input.to_string()));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| DashboardError::InvalidDate(input.to_string()))
}

fn end_of_month(today: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first - Duration::days(1))
}

/// Format a deadline relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_deadline_relative(deadline: NaiveDate, today: NaiveDate) -> String {
    let days = (deadline - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_and_shorthands() {
        let today = day(2024, 2, 10);
        assert_eq!(parse_deadline("2023-06-30", today).unwrap(), day(2023, 6, 30));
        assert_eq!(parse_deadline(" Today ", today).unwrap(), today);
        assert_eq!(parse_deadline("tomorrow", today).unwrap(), day(2024, 2, 11));
        assert_eq!(parse_deadline("in 3d", today).unwrap(), day(2024, 2, 13));
        assert_eq!(parse_deadline("in 2w", today).unwrap(), day(2024, 2, 24));
        assert_eq!(parse_deadline("eom", today).unwrap(), day(2024, 2, 29));
        assert_eq!(parse_deadline("eom", day(2024, 12, 3)).unwrap(), day(2024, 12, 31));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let today = day(2024, 2, 10);
        assert!(matches!(parse_deadline("someday", today), Err(DashboardError::InvalidDate(s)) if s == "someday"));
        assert!(parse_deadline("2024-13-01", today).is_err());
        assert!(parse_deadline("", today).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_offsets() {
        let today = day(2024, 2, 10);
        assert!(matches!(
            parse_deadline("in 99999999999d", today),
            Err(DashboardError::InvalidDate(s)) if s == "in 99999999999d"
        ));
        assert!(parse_deadline("in 9999999999999w", today).is_err());
        assert_eq!(parse_deadline("in -2d", today).unwrap(), day(2024, 2, 8));
    }

    #[test]
    fn test_format_relative() {
        let today = day(2024, 2, 10);
        assert_eq!(format_deadline_relative(today, today), "today");
        assert_eq!(format_deadline_relative(day(2024, 2, 11), today), "tomorrow");
        assert_eq!(format_deadline_relative(day(2024, 2, 15), today), "in 5d");
        assert_eq!(format_deadline_relative(day(2024, 2, 8), today), "2d late");
    }
}
