//! Dated price points and series validation.

use chrono::NaiveDate;

use crate::domain::error::TrendcastError;
use crate::ports::price_port::PricePort;

/// Number of points a series must hold to be predicted on.
pub const SERIES_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// True iff the series has exactly [`SERIES_LEN`] points and every value is
/// finite and > 0.
///
/// No ordering or date constraints are checked.
pub fn validate_series(series: &[PricePoint]) -> bool {
    series.len() == SERIES_LEN
        && series
            .iter()
            .all(|p| p.value.is_finite() && p.value > 0.0)
}

/// The `len` most recent points, returned oldest first.
pub fn latest_window(points: &[PricePoint], len: usize) -> Vec<PricePoint> {
    let mut sorted = newest_first(points);
    sorted.truncate(len);
    sorted.reverse();
    sorted
}

/// Fetches `asset` from `port` and keeps its latest [`SERIES_LEN`] points.
pub fn fetch_latest_series(
    port: &dyn PricePort,
    asset: &str,
) -> Result<Vec<PricePoint>, TrendcastError> {
    let points = port.fetch_prices(asset)?;
    Ok(latest_window(&points, SERIES_LEN))
}

/// Copy of the series sorted by date, newest first.
pub(crate) fn newest_first(series: &[PricePoint]) -> Vec<PricePoint> {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
