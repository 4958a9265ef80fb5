//! Prediction dispatcher: validate, then run the strategy for the mode.

use tracing::{debug, warn};

use crate::domain::error::TrendcastError;
use crate::domain::mode::{ModeStore, PredictionMode};
use crate::domain::prediction::PredictionResult;
use crate::domain::price::{validate_series, PricePoint, SERIES_LEN};
use crate::domain::strategy::run_strategy;

/// Stateless entry point to the strategies. Holds no mode of its own; the
/// caller passes one explicitly or hands over a [`ModeStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor;

impl Predictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(
        &self,
        series: &[PricePoint],
        mode: PredictionMode,
    ) -> Result<PredictionResult, TrendcastError> {
        if !validate_series(series) {
            warn!(points = series.len(), %mode, "rejecting invalid price series");
            return Err(TrendcastError::invalid_input(format!(
                "expected {} prices with values greater than 0, got {} points",
                SERIES_LEN,
                series.len()
            )));
        }

        let result = run_strategy(mode, series)?;
        debug!(%mode, trend = %result.trend, future = ?result.future_value, "prediction computed");
        Ok(result)
    }

    /// Reads the store once and returns the mode alongside the result it produced.
    pub fn predict_with_store(
        &self,
        series: &[PricePoint],
        store: &ModeStore,
    ) -> Result<(PredictionMode, PredictionResult), TrendcastError> {
        let mode = store.get();
        let result = self.predict(series, mode)?;
        Ok((mode, result))
    }
}
