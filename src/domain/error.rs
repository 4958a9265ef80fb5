//! Domain error types.

/// Top-level error type for trendcast.
#[derive(Debug, thiserror::Error)]
pub enum TrendcastError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unknown prediction mode '{name}'")]
    UnknownMode { name: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrendcastError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<&TrendcastError> for std::process::ExitCode {
    fn from(err: &TrendcastError) -> Self {
        let code: u8 = match err {
            TrendcastError::Io(_) => 1,
            TrendcastError::ConfigParse { .. }
            | TrendcastError::ConfigMissing { .. }
            | TrendcastError::ConfigInvalid { .. } => 2,
            TrendcastError::Data { .. } => 3,
            TrendcastError::InvalidInput { .. } | TrendcastError::UnknownMode { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
