//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::TrendcastError;
use crate::domain::ingest::parse_series;
use crate::domain::mode::{ModeStore, PredictionMode};
use crate::domain::prediction::PredictionResult;
use crate::domain::predictor::Predictor;
use crate::domain::price::{fetch_latest_series, validate_series, PricePoint, SERIES_LEN};
use crate::domain::settings::{build_settings, Settings};
use crate::ports::price_port::PricePort;

#[derive(Parser, Debug)]
#[command(name = "trendcast", about = "Short-term price trend predictor")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Predict the trend of a 20-point price series
    Predict {
        /// Text file with one `date,value` per line
        #[arg(short, long, conflicts_with = "asset", required_unless_present = "asset")]
        input: Option<PathBuf>,
        /// Asset name looked up in the configured data directory
        #[arg(short, long)]
        asset: Option<String>,
        /// sma, linear-regression or momentum (defaults to the configured mode)
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Check whether a price file holds a valid series
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List the available prediction modes
    Modes,
    /// List assets in the configured data directory
    ListAssets,
    /// Start the web server
    Serve,
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(code) => return code,
    };
    init_logging(if cli.verbose {
        Level::DEBUG
    } else {
        settings.log_level
    });

    match cli.command {
        Command::Predict { input, asset, mode } => {
            run_predict(&settings, input.as_deref(), asset.as_deref(), mode.as_deref())
        }
        Command::Validate { input } => run_validate(&input),
        Command::Modes => run_modes(&settings),
        Command::ListAssets => run_list_assets(&settings),
        Command::Serve => run_serve(&settings),
    }
}

/// Installs the stderr subscriber. A second call is a no-op.
pub fn init_logging(level: Level) {
    let filter = Targets::new().with_default(level);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, ExitCode> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
        .and_then(|adapter| build_settings(&adapter))
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })
}

/// Resolves the series for `predict`: a text file parsed leniently, or the
/// latest [`SERIES_LEN`] points of a stored asset.
pub fn load_series(
    settings: &Settings,
    input: Option<&Path>,
    asset: Option<&str>,
) -> Result<Vec<PricePoint>, TrendcastError> {
    match (input, asset) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)?;
            Ok(parse_series(&text))
        }
        (None, Some(asset)) => {
            let dir = settings
                .data_dir
                .clone()
                .ok_or_else(|| TrendcastError::ConfigMissing {
                    section: "data".into(),
                    key: "dir".into(),
                })?;
            fetch_latest_series(&CsvAdapter::new(dir), asset)
        }
        (None, None) => Err(TrendcastError::invalid_input(
            "either an input file or an asset is required",
        )),
    }
}

pub fn resolve_mode(
    settings: &Settings,
    mode: Option<&str>,
) -> Result<PredictionMode, TrendcastError> {
    match mode {
        Some(name) => name.parse(),
        None => Ok(settings.mode),
    }
}

pub fn format_result(result: &PredictionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Mode:      {}", result.mode_name);
    let _ = writeln!(out, "Trend:     {}", result.trend);
    if let Some(value) = result.future_value {
        let _ = writeln!(out, "Predicted: {:.2}", value);
    }
    let _ = writeln!(out, "Summary:   {}", result.summary);
    let _ = writeln!(out, "\nCalculations:");
    for (i, step) in result.calculation_steps.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, step);
    }
    out
}

fn run_predict(
    settings: &Settings,
    input: Option<&Path>,
    asset: Option<&str>,
    mode: Option<&str>,
) -> ExitCode {
    let mode = match resolve_mode(settings, mode) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match load_series(settings, input, asset) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} price points, mode {}", series.len(), mode);

    match Predictor::new().predict(&series, mode) {
        Ok(result) => {
            print!("{}", format_result(&result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(input: &Path) -> ExitCode {
    eprintln!("Validating price data: {}", input.display());
    let text = match fs::read_to_string(input) {
        Ok(t) => t,
        Err(e) => {
            let err = TrendcastError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let series = parse_series(&text);
    let non_positive = series.iter().filter(|p| p.value <= 0.0).count();
    println!("{} price points parsed", series.len());

    if validate_series(&series) {
        println!("Series is valid.");
        ExitCode::SUCCESS
    } else {
        if series.len() != SERIES_LEN {
            println!("Series is invalid: expected {} points", SERIES_LEN);
        }
        if non_positive > 0 {
            println!("Series is invalid: {} values are not greater than 0", non_positive);
        }
        ExitCode::from(4)
    }
}

fn run_modes(settings: &Settings) -> ExitCode {
    let store = ModeStore::new(settings.mode);
    let current = store.get();
    for info in store.list_modes() {
        let marker = if info.mode == current { "*" } else { " " };
        println!("{} {:<18} {}", marker, info.mode.key(), info.display_name);
    }
    ExitCode::SUCCESS
}

fn run_list_assets(settings: &Settings) -> ExitCode {
    let Some(dir) = settings.data_dir.clone() else {
        let err = TrendcastError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    };

    match CsvAdapter::new(dir).list_assets() {
        Ok(assets) => {
            if assets.is_empty() {
                eprintln!("No assets found");
            }
            for asset in &assets {
                println!("{}", asset);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_serve(settings: &Settings) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::sync::Arc;

        let state = AppState {
            predictor: Predictor::new(),
            modes: Arc::new(ModeStore::new(settings.mode)),
        };
        let router = build_router(state);
        let addr = settings.listen;

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("error: failed to start runtime: {e}");
                return ExitCode::from(1);
            }
        };

        eprintln!("Starting web server on {}", addr);
        let served = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router).await
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: web server failed: {e}");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = settings;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
