//! Linear regression strategy.
//!
//! Points are ranked by recency (rank 1 = newest, rank 20 = oldest) and an
//! ordinary least-squares line is fitted over (rank, value):
//!
//! m = (n*Sxy - Sx*Sy) / (n*Sxx - Sx^2)
//! b = (Sy - m*Sx) / n
//!
//! The forecast is the line at rank 21. The value it is compared against is
//! the one at the highest rank, i.e. the oldest point.

use crate::domain::error::TrendcastError;
use crate::domain::mode::PredictionMode;
use crate::domain::prediction::{PredictionResult, Trend};
use crate::domain::price::{newest_first, PricePoint};

use super::ensure_series_len;

pub fn predict_linear_regression(
    series: &[PricePoint],
) -> Result<PredictionResult, TrendcastError> {
    ensure_series_len(series)?;

    let sorted = newest_first(series);
    let ranked: Vec<(f64, f64)> = sorted
        .iter()
        .enumerate()
        .map(|(i, p)| ((i + 1) as f64, p.value))
        .collect();

    let (slope, intercept) = fit_line(&ranked)?;

    let next_rank = (ranked.len() + 1) as f64;
    let future_value = slope * next_rank + intercept;
    // rank 20: the oldest point
    let current_value = sorted[sorted.len() - 1].value;
    let trend = Trend::from_comparison(future_value, current_value);

    Ok(PredictionResult {
        mode_name: PredictionMode::LinearRegression.display_name().to_string(),
        trend,
        future_value: Some(future_value),
        summary: format!(
            "Current value: {:.2}, Predicted value: {:.2}",
            current_value, future_value
        ),
        calculation_steps: vec![
            format!("Slope (m): {:.4}", slope),
            format!("Intercept (b): {:.2}", intercept),
            format!("Current value: {:.2}", current_value),
            format!(
                "Predicted value for next period (rank {}): {:.2}",
                next_rank, future_value
            ),
            format!("Trend: {}", trend),
        ],
    })
}

/// Least-squares (slope, intercept) over (x, y) pairs.
fn fit_line(points: &[(f64, f64)]) -> Result<(f64, f64), TrendcastError> {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(TrendcastError::invalid_input(
            "regression is undefined: ranks have zero variance",
        ));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok((slope, intercept))
}
