//! Core domain types and the prediction engine.

pub mod price;
pub mod ingest;
pub mod prediction;
pub mod mode;
pub mod strategy;
pub mod predictor;
pub mod settings;
pub mod error;
