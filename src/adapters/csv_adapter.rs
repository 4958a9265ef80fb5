//! CSV file price adapter.
//!
//! Each asset lives in `<base_path>/<ASSET>.csv` with a `date,value` header.
//! Unlike [`parse_series`](crate::domain::ingest::parse_series) this reader is
//! strict: any malformed row fails the whole fetch.

use crate::domain::error::TrendcastError;
use crate::domain::ingest::parse_date;
use crate::domain::price::PricePoint;
use crate::ports::price_port::PricePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, asset: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", asset))
    }
}

impl PricePort for CsvAdapter {
    fn fetch_prices(&self, asset: &str) -> Result<Vec<PricePoint>, TrendcastError> {
        let path = self.csv_path(asset);
        let content = fs::read_to_string(&path).map_err(|e| TrendcastError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| TrendcastError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| TrendcastError::Data {
                reason: format!("row {}: missing date column", row + 1),
            })?;
            let date = parse_date(date_str).ok_or_else(|| TrendcastError::Data {
                reason: format!("row {}: invalid date '{}'", row + 1, date_str),
            })?;

            let value: f64 = record
                .get(1)
                .ok_or_else(|| TrendcastError::Data {
                    reason: format!("row {}: missing value column", row + 1),
                })?
                .parse()
                .map_err(|e| TrendcastError::Data {
                    reason: format!("row {}: invalid value: {}", row + 1, e),
                })?;
            if !value.is_finite() {
                return Err(TrendcastError::Data {
                    reason: format!("row {}: value {} is not finite", row + 1, value),
                });
            }

            points.push(PricePoint::new(date, value));
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    fn list_assets(&self) -> Result<Vec<String>, TrendcastError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TrendcastError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut assets = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| TrendcastError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(asset) = name_str.strip_suffix(".csv") {
                assets.push(asset.to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }
}
