// src/core/date.rs
//
// Month-truncated timestamps. The capitals table stores one row per
// (city, month); cells arrive as either "1950-01-01" (pandas-style) or
// "1950-01". Everything downstream keys on the first of the month.

use chrono::{Datelike, NaiveDate};

/// Parse a month cell, truncating any day component to the 1st.
/// Returns None for anything that is not a usable date.
pub fn parse_month(cell: &str) -> Option<NaiveDate> {
    let t = cell.trim();
    if t.is_empty() { return None; }

    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return d.with_day(1);
    }
    // "YYYY-MM"
    NaiveDate::parse_from_str(&join!(t, "-01"), "%Y-%m-%d").ok()
}

/// Canonical cell rendering, "YYYY-MM".
pub fn fmt_month(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_both_cell_shapes() {
        let a = parse_month("1950-01-01").unwrap();
        let b = parse_month("1950-01").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.day(), 1);
    }

    #[test]
    fn truncates_mid_month_days() {
        let d = parse_month("2024-06-15").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 6, 1));
    }

    #[test]
    fn rejects_junk() {
        assert!(parse_month("").is_none());
        assert!(parse_month("June 1950").is_none());
        assert!(parse_month("1950-13").is_none());
    }

    #[test]
    fn formats_back_to_year_month() {
        let d = parse_month("1950-01-01").unwrap();
        assert_eq!(fmt_month(d), "1950-01");
    }
}
