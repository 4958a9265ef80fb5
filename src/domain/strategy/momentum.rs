//! Momentum strategy.
//!
//! On the newest-first series, momentum at position t is
//! `value[t] - value[t - 5]`; the first 5 positions have no look-back point.
//! The trend comes from the last position only:
//! ROC = (value[19] / value[14] - 1) * 100, Bullish iff ROC > 0.

use crate::domain::error::TrendcastError;
use crate::domain::mode::PredictionMode;
use crate::domain::prediction::{PredictionResult, Trend};
use crate::domain::price::{newest_first, PricePoint};

use super::ensure_series_len;

pub const LOOKBACK: usize = 5;

pub fn predict_momentum(series: &[PricePoint]) -> Result<PredictionResult, TrendcastError> {
    ensure_series_len(series)?;

    let sorted = newest_first(series);
    let mut steps = Vec::with_capacity(sorted.len());

    for (t, point) in sorted.iter().enumerate() {
        if t < LOOKBACK {
            steps.push(format!("t={}, Price={:.2}, Momentum=N/A", t, point.value));
        } else {
            let previous = sorted[t - LOOKBACK].value;
            let momentum = point.value - previous;
            steps.push(format!(
                "t={}, Price={:.2}, Price t-{}={:.2}, Momentum={:.2}",
                t, point.value, LOOKBACK, previous, momentum
            ));
        }
    }

    let last = sorted.len() - 1;
    let roc = rate_of_change(sorted[last].value, sorted[last - LOOKBACK].value);
    let trend = Trend::from_comparison(roc, 0.0);

    Ok(PredictionResult {
        mode_name: PredictionMode::Momentum.display_name().to_string(),
        trend,
        future_value: None,
        summary: format!("Final ROC: {:.2}%", roc),
        calculation_steps: steps,
    })
}

/// Percentage change from `previous` to `current`. `previous` is > 0 on validated input.
fn rate_of_change(current: f64, previous: f64) -> f64 {
    (current / previous - 1.0) * 100.0
}
