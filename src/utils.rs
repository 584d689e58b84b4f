use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts a month start by `offset` months (negative goes back in time).
pub fn shift_months(month: NaiveDate, offset: i32) -> NaiveDate {
    let start = month_start(month);
    let shifted = if offset >= 0 {
        start.checked_add_months(Months::new(offset as u32))
    } else {
        start.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(start)
}

pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Every month start from `start` to `end`, both inclusive.
pub fn month_starts_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let first = month_start(start);
    let span = months_between(first, end);
    if span < 0 {
        return Vec::new();
    }

    (0..=span).map(|offset| shift_months(first, offset)).collect()
}

/// Formats a month as "YYYY-MM".
pub fn format_period(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Parses the date formats the transaction stores emit.
/// Timestamps are truncated to their calendar date.
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(timestamp.date());
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(timestamp.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_months_across_years() {
        assert_eq!(shift_months(ymd(2024, 1, 15), -1), ymd(2023, 12, 1));
        assert_eq!(shift_months(ymd(2023, 11, 30), 3), ymd(2024, 2, 1));
        assert_eq!(shift_months(ymd(2024, 5, 1), 0), ymd(2024, 5, 1));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(ymd(2023, 11, 1), ymd(2024, 2, 1)), 3);
        assert_eq!(months_between(ymd(2024, 2, 1), ymd(2024, 2, 29)), 0);
        assert_eq!(months_between(ymd(2024, 3, 1), ymd(2024, 1, 1)), -2);
    }

    #[test]
    fn test_month_starts_in_range() {
        let months = month_starts_in_range(ymd(2023, 11, 20), ymd(2024, 2, 3));
        assert_eq!(
            months,
            vec![ymd(2023, 11, 1), ymd(2023, 12, 1), ymd(2024, 1, 1), ymd(2024, 2, 1)]
        );
        assert!(month_starts_in_range(ymd(2024, 3, 1), ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_parse_transaction_date_formats() {
        assert_eq!(parse_transaction_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_transaction_date(" 2024/01/05 "), Some(ymd(2024, 1, 5)));
        assert_eq!(
            parse_transaction_date("2024-01-05T23:10:00+00:00"),
            Some(ymd(2024, 1, 5))
        );
        assert_eq!(
            parse_transaction_date("2024-01-05T08:30:00.250"),
            Some(ymd(2024, 1, 5))
        );
        assert_eq!(
            parse_transaction_date("2024-01-05 08:30:00"),
            Some(ymd(2024, 1, 5))
        );
        assert_eq!(
            parse_transaction_date("2024-01-05 08:30:00+00:00"),
            Some(ymd(2024, 1, 5))
        );
    }

    #[test]
    fn test_parse_transaction_date_rejects_garbage() {
        assert_eq!(parse_transaction_date("not-a-date"), None);
        assert_eq!(parse_transaction_date(""), None);
        assert_eq!(parse_transaction_date("2024-13-01"), None);
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(ymd(2024, 3, 1)), "2024-03");
    }
}
