//! Prediction output shared by all strategies.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// Strict comparison: equality is Bearish.
    pub fn from_comparison(predicted: f64, reference: f64) -> Self {
        if predicted > reference {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub mode_name: String,
    pub trend: Trend,
    pub future_value: Option<f64>,
    pub summary: String,
    pub calculation_steps: Vec<String>,
}
