//! Price source port trait.

use crate::domain::error::TrendcastError;
use crate::domain::price::PricePoint;

pub trait PricePort {
    /// All stored points for `asset`, oldest first.
    fn fetch_prices(&self, asset: &str) -> Result<Vec<PricePoint>, TrendcastError>;

    fn list_assets(&self) -> Result<Vec<String>, TrendcastError>;
}
