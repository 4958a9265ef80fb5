#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Prediction form renders with the current mode
//! - Submitting valid data renders the result page
//! - Invalid, empty and oversized submissions
//! - Structured 20-field entry form
//! - Mode page listing and switching
//! - Fallback 404

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use trendcast::adapters::web::{build_router, AppState};
use trendcast::domain::mode::{ModeStore, PredictionMode};
use trendcast::domain::predictor::Predictor;

use common::*;

fn create_test_app(mode: PredictionMode) -> (Router, Arc<ModeStore>) {
    let modes = Arc::new(ModeStore::new(mode));
    let state = AppState {
        predictor: Predictor::new(),
        modes: Arc::clone(&modes),
    };
    (build_router(state), modes)
}

fn form_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

/// `date_N`/`value_N` form body for the given series, one pair per point.
fn entry_fields(points: &[PricePoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("date_{n}={}&value_{n}={}", p.date, p.value, n = i + 1))
        .collect::<Vec<_>>()
        .join("&")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

mod prediction_form {
    use super::*;

    #[tokio::test]
    async fn renders_with_current_mode() {
        let (app, _) = create_test_app(PredictionMode::Momentum);
        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<textarea name=\"data\""));
        assert!(body.contains("Current mode: Momentum"));
        assert!(body.contains("<!DOCTYPE html>"));
    }
}

mod predict {
    use super::*;

    #[tokio::test]
    async fn valid_data_renders_result() {
        let (app, _) = create_test_app(PredictionMode::LinearRegression);
        let data = series_text(&descending_rank_prices());
        let response = app
            .oneshot(post_form("/predict", format!("data={}", form_encode(&data))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Prediction: Bullish"));
        assert!(body.contains("Mode: Linear Regression"));
        assert!(body.contains("Predicted value: 121.00"));
        assert!(body.contains("<li>Slope (m): 1.0000</li>"));
    }

    #[tokio::test]
    async fn uses_mode_set_after_startup() {
        let (app, modes) = create_test_app(PredictionMode::Sma);
        modes.set(PredictionMode::Momentum);

        let data = series_text(&[20.0; 20]);
        let response = app
            .oneshot(post_form("/predict", format!("data={}", form_encode(&data))))
            .await
            .unwrap();

        let body = body_string(response).await;
        assert!(body.contains("Prediction: Bearish"));
        assert!(body.contains("Final ROC: 0.00%"));
        assert!(!body.contains("Predicted value"));
    }

    #[tokio::test]
    async fn short_series_returns_form_with_error() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let data = series_text(&[20.0; 7]);
        let response = app
            .oneshot(post_form("/predict", format!("data={}", form_encode(&data))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("20 entries with valid dates"));
        assert!(body.contains("<textarea"));
    }

    #[tokio::test]
    async fn empty_data_is_bad_request() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let response = app
            .oneshot(post_form("/predict", "data=".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_data_is_bad_request() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let data = "2024-01-01,10.0\n".repeat(200);
        let response = app
            .oneshot(post_form("/predict", format!("data={}", form_encode(&data))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("cannot exceed 2000 characters"));
    }
}

mod entry_form {
    use super::*;

    #[tokio::test]
    async fn renders_twenty_rows() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let response = app.oneshot(get("/predict/fields")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("name=\"date_1\""));
        assert!(body.contains("name=\"value_20\""));
        assert!(!body.contains("name=\"date_21\""));
    }

    #[tokio::test]
    async fn complete_entries_render_result() {
        let (app, _) = create_test_app(PredictionMode::LinearRegression);
        let mut points = make_series(&descending_rank_prices());
        points.reverse();

        let response = app
            .oneshot(post_form("/predict/fields", entry_fields(&points)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Prediction: Bullish"));
        assert!(body.contains("Predicted value: 121.00"));
    }

    #[tokio::test]
    async fn fewer_than_twenty_complete_entries_is_rejected() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let points = make_series(&[20.0; 20]);
        let body = format!(
            "{}&date_20={}&value_20=",
            entry_fields(&points[..19]),
            points[19].date
        );

        let response = app
            .oneshot(post_form("/predict/fields", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("20 entries with valid dates"));
        assert!(body.contains("value=\"2024-03-01\""));
    }

    #[tokio::test]
    async fn non_positive_entry_is_rejected() {
        let (app, _) = create_test_app(PredictionMode::Momentum);
        let mut prices = vec![20.0; 20];
        prices[4] = 0.0;

        let response = app
            .oneshot(post_form("/predict/fields", entry_fields(&make_series(&prices))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod mode_page {
    use super::*;

    #[tokio::test]
    async fn lists_all_modes_with_selection() {
        let (app, _) = create_test_app(PredictionMode::LinearRegression);
        let response = app.oneshot(get("/mode")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Simple Moving Average Crossover"));
        assert!(body.contains("<option value=\"linear-regression\" selected>"));
        assert!(body.contains("<option value=\"momentum\">"));
    }

    #[tokio::test]
    async fn post_changes_the_store() {
        let (app, modes) = create_test_app(PredictionMode::Sma);
        let response = app
            .oneshot(post_form("/mode", "mode=momentum".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(modes.get(), PredictionMode::Momentum);
        let body = body_string(response).await;
        assert!(body.contains("Prediction mode updated."));
        assert!(body.contains("<option value=\"momentum\" selected>"));
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected() {
        let (app, modes) = create_test_app(PredictionMode::Sma);
        let response = app
            .oneshot(post_form("/mode", "mode=ema".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(modes.get(), PredictionMode::Sma);
    }
}

mod fallback {
    use super::*;

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (app, _) = create_test_app(PredictionMode::Sma);
        let response = app.oneshot(get("/nowhere")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Page not found"));
    }
}
