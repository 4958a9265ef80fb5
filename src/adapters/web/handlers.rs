//! HTTP request handlers for web adapter.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::domain::error::TrendcastError;
use crate::domain::ingest::{parse_series, series_from_entries};
use crate::domain::mode::PredictionMode;
use crate::domain::price::SERIES_LEN;

use super::templates::{
    render_page, EntryFormTemplate, ModeTemplate, PredictionFormTemplate,
    PredictionResultTemplate,
};
use super::{AppState, WebError, MAX_INPUT_CHARS};

const INVALID_SERIES_MESSAGE: &str =
    "The data is not valid. 20 entries with valid dates and values greater than 0 are required.";

pub async fn prediction_form(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let template = PredictionFormTemplate::new("", "", state.modes.get());
    Ok(render_page("Predict", &template)?.into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct PredictionFormData {
    pub data: String,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictionFormData>,
) -> Result<Response, WebError> {
    if form.data.trim().is_empty() {
        return Err(WebError::bad_request("Price data is required"));
    }
    if form.data.chars().count() > MAX_INPUT_CHARS {
        return Err(WebError::bad_request(format!(
            "Price data cannot exceed {} characters",
            MAX_INPUT_CHARS
        )));
    }

    let series = parse_series(&form.data);
    debug!(points = series.len(), "parsed submitted price data");

    match state.predictor.predict_with_store(&series, &state.modes) {
        Ok((_, result)) => {
            let template = PredictionResultTemplate::new(&result);
            Ok(render_page("Result", &template)?.into_response())
        }
        Err(TrendcastError::InvalidInput { .. }) => {
            let template =
                PredictionFormTemplate::new(&form.data, INVALID_SERIES_MESSAGE, state.modes.get());
            let page = render_page("Predict", &template)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn entry_form(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let template = EntryFormTemplate::new(&[], "", state.modes.get());
    Ok(render_page("Predict", &template)?.into_response())
}

/// Structured submission: fields `date_1`..`date_20` and `value_1`..`value_20`.
pub async fn predict_entries(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, WebError> {
    let fields: Vec<(String, String)> = (1..=SERIES_LEN)
        .map(|i| {
            let field = |name: &str| {
                form.get(&format!("{name}_{i}"))
                    .cloned()
                    .unwrap_or_default()
            };
            (field("date"), field("value"))
        })
        .collect();

    let outcome = series_from_entries(fields.iter().map(|(d, v)| (d.as_str(), v.as_str())))
        .and_then(|series| {
            debug!(points = series.len(), "collected structured price entries");
            state.predictor.predict_with_store(&series, &state.modes)
        });

    match outcome {
        Ok((_, result)) => {
            let template = PredictionResultTemplate::new(&result);
            Ok(render_page("Result", &template)?.into_response())
        }
        Err(TrendcastError::InvalidInput { .. }) => {
            let template =
                EntryFormTemplate::new(&fields, INVALID_SERIES_MESSAGE, state.modes.get());
            let page = render_page("Predict", &template)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn mode_page(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let template = ModeTemplate::new(&state.modes.list_modes(), state.modes.get(), "");
    Ok(render_page("Mode", &template)?.into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct ModeFormData {
    pub mode: String,
}

pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ModeFormData>,
) -> Result<Response, WebError> {
    let mode: PredictionMode = form.mode.parse()?;
    state.modes.set(mode);

    let template = ModeTemplate::new(
        &state.modes.list_modes(),
        mode,
        "Prediction mode updated.",
    );
    Ok(render_page("Mode", &template)?.into_response())
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
