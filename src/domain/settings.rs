//! Runtime settings read from a [`ConfigPort`].
//!
//! ```ini
//! [predictor]
//! mode = sma
//!
//! [data]
//! dir = ./data
//!
//! [web]
//! listen = 127.0.0.1:3000
//!
//! [log]
//! level = info
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::domain::error::TrendcastError;
use crate::domain::mode::PredictionMode;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mode: PredictionMode,
    pub data_dir: Option<PathBuf>,
    pub listen: SocketAddr,
    pub log_level: Level,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: PredictionMode::default(),
            data_dir: None,
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: Level::INFO,
        }
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, TrendcastError> {
    Ok(Settings {
        mode: read_mode(config)?,
        data_dir: read_data_dir(config)?,
        listen: read_listen(config)?,
        log_level: read_log_level(config)?,
    })
}

fn read_mode(config: &dyn ConfigPort) -> Result<PredictionMode, TrendcastError> {
    match config.get_string("predictor", "mode") {
        None => Ok(PredictionMode::default()),
        Some(s) => PredictionMode::from_str(&s).map_err(|_| TrendcastError::ConfigInvalid {
            section: "predictor".to_string(),
            key: "mode".to_string(),
            reason: format!("unknown mode '{}', expected one of sma, linear-regression, momentum", s),
        }),
    }
}

fn read_data_dir(config: &dyn ConfigPort) -> Result<Option<PathBuf>, TrendcastError> {
    match config.get_string("data", "dir") {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Err(TrendcastError::ConfigInvalid {
            section: "data".to_string(),
            key: "dir".to_string(),
            reason: "dir must not be empty".to_string(),
        }),
        Some(s) => Ok(Some(PathBuf::from(s.trim()))),
    }
}

fn read_listen(config: &dyn ConfigPort) -> Result<SocketAddr, TrendcastError> {
    let value = config.get_string_or("web", "listen", DEFAULT_LISTEN);
    value
        .trim()
        .parse()
        .map_err(|_| TrendcastError::ConfigInvalid {
            section: "web".to_string(),
            key: "listen".to_string(),
            reason: format!("'{}' is not a socket address", value),
        })
}

fn read_log_level(config: &dyn ConfigPort) -> Result<Level, TrendcastError> {
    match config.get_string("log", "level") {
        None => Ok(Level::INFO),
        Some(s) => Level::from_str(s.trim()).map_err(|_| TrendcastError::ConfigInvalid {
            section: "log".to_string(),
            key: "level".to_string(),
            reason: format!("unknown level '{}'", s),
        }),
    }
}
