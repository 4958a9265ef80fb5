#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use trendcast::domain::error::TrendcastError;
pub use trendcast::domain::price::PricePoint;
use trendcast::ports::price_port::PricePort;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, asset: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(asset.to_string(), points);
        self
    }

    pub fn with_error(mut self, asset: &str, reason: &str) -> Self {
        self.errors.insert(asset.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(&self, asset: &str) -> Result<Vec<PricePoint>, TrendcastError> {
        if let Some(reason) = self.errors.get(asset) {
            return Err(TrendcastError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(asset).cloned().unwrap_or_default())
    }

    fn list_assets(&self) -> Result<Vec<String>, TrendcastError> {
        let mut assets: Vec<String> = self.data.keys().cloned().collect();
        assets.sort();
        Ok(assets)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One point per day starting 2024-03-01, oldest first.
pub fn make_series(prices: &[f64]) -> Vec<PricePoint> {
    let start = date(2024, 3, 1);
    prices
        .iter()
        .enumerate()
        .map(|(i, &value)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            value,
        })
        .collect()
}

/// The same series as [`make_series`] rendered as `date,value` lines.
pub fn series_text(prices: &[f64]) -> String {
    make_series(prices)
        .iter()
        .map(|p| format!("{},{}\n", p.date.format("%Y-%m-%d"), p.value))
        .collect()
}

/// Prices where rank r (1 = newest) holds `100 + r`.
pub fn descending_rank_prices() -> Vec<f64> {
    (1..=20).rev().map(|rank| 100.0 + rank as f64).collect()
}
