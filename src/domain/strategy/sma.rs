//! SMA crossover strategy.
//!
//! short = mean of the 5 newest values, long = mean of all 20.
//! Bullish iff short > long. No future value is produced.

use crate::domain::error::TrendcastError;
use crate::domain::mode::PredictionMode;
use crate::domain::prediction::{PredictionResult, Trend};
use crate::domain::price::{newest_first, PricePoint};

use super::ensure_series_len;

pub const SHORT_PERIOD: usize = 5;

pub fn predict_sma(series: &[PricePoint]) -> Result<PredictionResult, TrendcastError> {
    ensure_series_len(series)?;

    let sorted = newest_first(series);
    let long_period = sorted.len();

    let short_avg = mean(&sorted[..SHORT_PERIOD]);
    let long_avg = mean(&sorted);

    let trend = Trend::from_comparison(short_avg, long_avg);
    let operator = match trend {
        Trend::Bullish => ">",
        Trend::Bearish => "<=",
    };

    Ok(PredictionResult {
        mode_name: PredictionMode::Sma.display_name().to_string(),
        trend,
        future_value: None,
        summary: format!(
            "SMA short ({}): {:.2}, SMA long ({}): {:.2}",
            SHORT_PERIOD, short_avg, long_period, long_avg
        ),
        calculation_steps: vec![
            format!("SMA short ({}): {:.2}", SHORT_PERIOD, short_avg),
            format!("SMA long ({}): {:.2}", long_period, long_avg),
            format!("Trend: {} (SMA short {} SMA long)", trend, operator),
        ],
    })
}

fn mean(points: &[PricePoint]) -> f64 {
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}
