//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::TrendcastError;

use super::templates::{ErrorTemplate, LayoutTemplate};

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &TrendcastError) -> StatusCode {
    match err {
        TrendcastError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TrendcastError::UnknownMode { .. }
        | TrendcastError::ConfigMissing { .. }
        | TrendcastError::ConfigInvalid { .. }
        | TrendcastError::ConfigParse { .. } => StatusCode::BAD_REQUEST,
        TrendcastError::Data { .. } | TrendcastError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<TrendcastError> for WebError {
    fn from(err: TrendcastError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        let content = match body.render() {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };
        let page = LayoutTemplate {
            title: "Error",
            content: &content,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, content).into_response(),
        }
    }
}
