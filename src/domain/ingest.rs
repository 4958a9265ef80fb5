//! Price series ingestion.
//!
//! [`parse_series`] reads `date,value` text leniently: lines that do not split
//! into exactly two comma-separated fields, or whose date or value fails to
//! parse, are dropped. It never fails; a short result is caught later by
//! [`validate_series`](crate::domain::price::validate_series).
//!
//! [`series_from_entries`] builds a series from separate date and value
//! fields, as submitted by a structured form.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::error::TrendcastError;
use crate::domain::price::PricePoint;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_series(text: &str) -> Vec<PricePoint> {
    let mut points = Vec::new();

    for (line_no, line) in text.split(['\n', '\r']).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(point) => points.push(point),
            None => debug!(line = line_no + 1, content = line, "skipping malformed price line"),
        }
    }

    points
}

/// Builds a series from `(date, value)` field pairs, sorted oldest first.
///
/// Pairs with a blank date or value are skipped. A complete pair that does
/// not parse is an error naming its 1-based position.
pub fn series_from_entries<'a, I>(entries: I) -> Result<Vec<PricePoint>, TrendcastError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut points = Vec::new();

    for (i, (date, value)) in entries.into_iter().enumerate() {
        let (date, value) = (date.trim(), value.trim());
        if date.is_empty() || value.is_empty() {
            continue;
        }
        let date = parse_date(date).ok_or_else(|| {
            TrendcastError::invalid_input(format!("entry {}: invalid date '{}'", i + 1, date))
        })?;
        let value = parse_value(value).ok_or_else(|| {
            TrendcastError::invalid_input(format!("entry {}: invalid value '{}'", i + 1, value))
        })?;
        points.push(PricePoint::new(date, value));
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

fn parse_line(line: &str) -> Option<PricePoint> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 2 {
        return None;
    }
    let date = parse_date(fields[0].trim())?;
    let value = parse_value(fields[1].trim())?;
    Some(PricePoint::new(date, value))
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_value(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_single_line() {
        let points = parse_series("2024-01-01,10.50");
        assert_eq!(points, vec![PricePoint::new(date(2024, 1, 1), 10.5)]);
    }

    #[test]
    fn drops_malformed_lines() {
        assert!(parse_series("not-a-date,10.50").is_empty());
        assert!(parse_series("10.50").is_empty());
        assert!(parse_series("2024-01-01,abc").is_empty());
        assert!(parse_series("2024-01-01,10.50,extra").is_empty());
    }

    #[test]
    fn keeps_good_lines_around_bad_ones() {
        let text = "2024-01-03,12\ngarbage\n\n2024-01-01,10\r\n2024-01-02, 11.25 \n";
        let points = parse_series(text);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, date(2024, 1, 3));
        assert_eq!(points[1].date, date(2024, 1, 1));
        assert_eq!(points[2].value, 11.25);
    }

    #[test]
    fn value_format_is_locale_independent() {
        // a decimal comma splits into three fields
        assert!(parse_series("2024-01-01,10,50").is_empty());
        assert_eq!(parse_series("2024-01-01,1e2")[0].value, 100.0);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse_series("2024-01-01,NaN").is_empty());
        assert!(parse_series("2024-01-01,inf").is_empty());
    }

    #[test]
    fn accepts_alternate_date_forms() {
        assert_eq!(parse_date("2024/03/05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("05/03/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T16:30:00"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("March 5"), None);
    }

    #[test]
    fn entries_skip_incomplete_pairs_and_sort() {
        let entries = [
            ("2024-01-03", "12"),
            ("", "99"),
            ("2024-01-01", " 10.5 "),
            ("2024-01-02", ""),
            ("  ", "  "),
        ];
        let points = series_from_entries(entries).unwrap();
        assert_eq!(
            points,
            vec![
                PricePoint::new(date(2024, 1, 1), 10.5),
                PricePoint::new(date(2024, 1, 3), 12.0),
            ]
        );
    }

    #[test]
    fn malformed_entry_is_an_error() {
        let err = series_from_entries([("2024-01-01", "10"), ("soon", "11")]).unwrap_err();
        assert!(matches!(err, TrendcastError::InvalidInput { reason } if reason.contains("entry 2")));

        let err = series_from_entries([("2024-01-01", "inf")]).unwrap_err();
        assert!(matches!(err, TrendcastError::InvalidInput { reason } if reason.contains("entry 1")));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_series("").is_empty());
        assert!(parse_series("\n\r\n  \n").is_empty());
    }
}
