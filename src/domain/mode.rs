//! Prediction modes and the process-wide current selection.

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::domain::error::TrendcastError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PredictionMode {
    #[default]
    Sma,
    LinearRegression,
    Momentum,
}

impl PredictionMode {
    pub const ALL: [PredictionMode; 3] = [
        PredictionMode::Sma,
        PredictionMode::LinearRegression,
        PredictionMode::Momentum,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PredictionMode::Sma => "Simple Moving Average Crossover",
            PredictionMode::LinearRegression => "Linear Regression",
            PredictionMode::Momentum => "Momentum",
        }
    }

    /// Short key used in config files, the CLI and web forms.
    pub fn key(&self) -> &'static str {
        match self {
            PredictionMode::Sma => "sma",
            PredictionMode::LinearRegression => "linear-regression",
            PredictionMode::Momentum => "momentum",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PredictionMode {
    type Err = TrendcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "sma" => Ok(PredictionMode::Sma),
            "linear-regression" | "regression" | "lr" => Ok(PredictionMode::LinearRegression),
            "momentum" | "roc" => Ok(PredictionMode::Momentum),
            _ => Err(TrendcastError::UnknownMode {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub mode: PredictionMode,
    pub display_name: &'static str,
}

/// Holds the currently selected mode. Reads and writes are each a single
/// critical section; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ModeStore {
    current: RwLock<PredictionMode>,
}

impl ModeStore {
    pub fn new(initial: PredictionMode) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn get(&self) -> PredictionMode {
        // A Copy value cannot be left half-written, so a poisoned lock is still usable.
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, mode: PredictionMode) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = *guard;
        *guard = mode;
        drop(guard);
        info!(from = %previous, to = %mode, "prediction mode changed");
    }

    pub fn list_modes(&self) -> Vec<ModeInfo> {
        PredictionMode::ALL
            .iter()
            .map(|&mode| ModeInfo {
                mode,
                display_name: mode.display_name(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn defaults_to_sma() {
        assert_eq!(ModeStore::default().get(), PredictionMode::Sma);
    }

    #[test]
    fn set_then_get() {
        let store = ModeStore::new(PredictionMode::Sma);
        store.set(PredictionMode::Momentum);
        assert_eq!(store.get(), PredictionMode::Momentum);
        store.set(PredictionMode::LinearRegression);
        assert_eq!(store.get(), PredictionMode::LinearRegression);
    }

    #[test]
    fn list_is_fixed_regardless_of_selection() {
        let store = ModeStore::new(PredictionMode::Momentum);
        let modes: Vec<_> = store.list_modes().iter().map(|m| m.mode).collect();
        assert_eq!(modes, PredictionMode::ALL.to_vec());

        store.set(PredictionMode::Sma);
        assert_eq!(store.list_modes().len(), 3);
        assert_eq!(store.list_modes()[1].display_name, "Linear Regression");
    }

    #[test]
    fn visible_across_threads() {
        let store = Arc::new(ModeStore::default());
        let writer = Arc::clone(&store);
        thread::spawn(move || writer.set(PredictionMode::LinearRegression))
            .join()
            .unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&store);
                thread::spawn(move || s.get())
            })
            .collect();
        for r in readers {
            assert_eq!(r.join().unwrap(), PredictionMode::LinearRegression);
        }
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("sma".parse::<PredictionMode>().unwrap(), PredictionMode::Sma);
        assert_eq!(
            "Linear_Regression".parse::<PredictionMode>().unwrap(),
            PredictionMode::LinearRegression
        );
        assert_eq!(" momentum ".parse::<PredictionMode>().unwrap(), PredictionMode::Momentum);
        assert!(matches!(
            "ema".parse::<PredictionMode>(),
            Err(TrendcastError::UnknownMode { name }) if name == "ema"
        ));
    }

    #[test]
    fn key_round_trips_through_from_str() {
        for mode in PredictionMode::ALL {
            assert_eq!(mode.key().parse::<PredictionMode>().unwrap(), mode);
        }
    }
}
