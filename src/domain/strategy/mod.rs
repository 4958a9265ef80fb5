//! Trend prediction strategies.
//!
//! Each strategy is a plain function over a 20-point series:
//! - `sma`: short/long simple moving average crossover
//! - `regression`: least-squares line over recency rank
//! - `momentum`: 5-period momentum and final rate of change
//!
//! [`run_strategy`] maps a [`PredictionMode`] onto its function.

pub mod momentum;
pub mod regression;
pub mod sma;

use crate::domain::error::TrendcastError;
use crate::domain::mode::PredictionMode;
use crate::domain::prediction::PredictionResult;
use crate::domain::price::{PricePoint, SERIES_LEN};

pub fn run_strategy(
    mode: PredictionMode,
    series: &[PricePoint],
) -> Result<PredictionResult, TrendcastError> {
    match mode {
        PredictionMode::Sma => sma::predict_sma(series),
        PredictionMode::LinearRegression => regression::predict_linear_regression(series),
        PredictionMode::Momentum => momentum::predict_momentum(series),
    }
}

/// Length guard every strategy applies on its own, independent of the dispatcher.
fn ensure_series_len(series: &[PricePoint]) -> Result<(), TrendcastError> {
    if series.len() != SERIES_LEN {
        return Err(TrendcastError::invalid_input(format!(
            "price series must contain exactly {} points, got {}",
            SERIES_LEN,
            series.len()
        )));
    }
    Ok(())
}
