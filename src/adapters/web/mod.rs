//! Web front end adapter.
//!
//! Axum server with plain HTML forms for submitting a price series, either as
//! pasted text or as 20 separate date and price fields, and for switching the
//! prediction mode.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::mode::ModeStore;
use crate::domain::predictor::Predictor;

/// Longest accepted `data` field, in characters.
pub const MAX_INPUT_CHARS: usize = 2000;

pub struct AppState {
    pub predictor: Predictor,
    pub modes: Arc<ModeStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::prediction_form))
        .route("/predict", get(handlers::prediction_form).post(handlers::predict))
        .route(
            "/predict/fields",
            get(handlers::entry_form).post(handlers::predict_entries),
        )
        .route("/mode", get(handlers::mode_page).post(handlers::set_mode))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
