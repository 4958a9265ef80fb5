//! HTML templates using Askama.

use askama::Template;
use axum::response::Html;

use crate::domain::mode::{ModeInfo, PredictionMode};
use crate::domain::prediction::PredictionResult;
use crate::domain::price::SERIES_LEN;

use super::{MAX_INPUT_CHARS, WebError};

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{ title }} - trendcast</title></head>
<body>
<nav><a href="/">Predict</a> | <a href="/mode">Mode</a></nav>
<main>{{ content|safe }}</main>
</body>
</html>"#,
    ext = "html"
)]
pub struct LayoutTemplate<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Renders `template` inside the shared page layout.
pub fn render_page<T: Template>(title: &str, template: &T) -> Result<Html<String>, WebError> {
    let content = template
        .render()
        .map_err(|e| WebError::internal(format!("template error: {e}")))?;
    let page = LayoutTemplate {
        title,
        content: &content,
    };
    page.render()
        .map(Html)
        .map_err(|e| WebError::internal(format!("template error: {e}")))
}

#[derive(Template)]
#[template(
    source = r#"<h1>Trend prediction</h1>
{% if !error.is_empty() %}<p class="error">{{ error }}</p>{% endif %}
<p>Paste 20 lines of <code>date,value</code>.</p>
<form method="post" action="/predict">
<textarea name="data" rows="22" cols="40" maxlength="{{ max_chars }}">{{ data }}</textarea>
<p>Current mode: {{ mode_name }} (<a href="/mode">change</a>)</p>
<button type="submit">Predict</button>
</form>
<p><a href="/predict/fields">Enter values individually</a></p>"#,
    ext = "html"
)]
pub struct PredictionFormTemplate<'a> {
    pub data: &'a str,
    pub error: &'a str,
    pub mode_name: &'a str,
    pub max_chars: usize,
}

impl<'a> PredictionFormTemplate<'a> {
    pub fn new(data: &'a str, error: &'a str, mode: PredictionMode) -> Self {
        Self {
            data,
            error,
            mode_name: mode.display_name(),
            max_chars: MAX_INPUT_CHARS,
        }
    }
}

pub struct EntryRow {
    pub index: usize,
    pub date: String,
    pub value: String,
}

#[derive(Template)]
#[template(
    source = r#"<h1>Trend prediction</h1>
{% if !error.is_empty() %}<p class="error">{{ error }}</p>{% endif %}
<p>Enter 20 dates and prices. Rows with a blank field are ignored.</p>
<form method="post" action="/predict/fields">
<table>
<tr><th>#</th><th>Date</th><th>Price</th></tr>
{% for row in rows %}<tr><td>{{ row.index }}</td><td><input type="date" name="date_{{ row.index }}" value="{{ row.date }}"></td><td><input type="number" step="0.01" min="0.01" name="value_{{ row.index }}" value="{{ row.value }}"></td></tr>
{% endfor %}</table>
<p>Current mode: {{ mode_name }} (<a href="/mode">change</a>)</p>
<button type="submit">Predict</button>
</form>
<p><a href="/">Paste text instead</a></p>"#,
    ext = "html"
)]
pub struct EntryFormTemplate<'a> {
    pub rows: Vec<EntryRow>,
    pub error: &'a str,
    pub mode_name: &'a str,
}

impl<'a> EntryFormTemplate<'a> {
    /// `fields` holds the submitted `(date, value)` pairs; missing rows are blank.
    pub fn new(fields: &[(String, String)], error: &'a str, mode: PredictionMode) -> Self {
        let rows = (1..=SERIES_LEN)
            .map(|index| {
                let (date, value) = fields.get(index - 1).cloned().unwrap_or_default();
                EntryRow { index, date, value }
            })
            .collect();
        Self {
            rows,
            error,
            mode_name: mode.display_name(),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<h1>Prediction: {{ trend }}</h1>
<p>Mode: {{ mode_name }}</p>
{% if !future_value.is_empty() %}<p>Predicted value: {{ future_value }}</p>{% endif %}
<p>{{ summary }}</p>
<h2>Calculations</h2>
<ol>
{% for step in steps %}<li>{{ step }}</li>
{% endfor %}</ol>
<p><a href="/">New prediction</a></p>"#,
    ext = "html"
)]
pub struct PredictionResultTemplate<'a> {
    pub mode_name: &'a str,
    pub trend: String,
    pub future_value: String,
    pub summary: &'a str,
    pub steps: &'a [String],
}

impl<'a> PredictionResultTemplate<'a> {
    pub fn new(result: &'a PredictionResult) -> Self {
        Self {
            mode_name: &result.mode_name,
            trend: result.trend.to_string(),
            future_value: result
                .future_value
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
            summary: &result.summary,
            steps: &result.calculation_steps,
        }
    }
}

pub struct ModeOption {
    pub key: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(
    source = r#"<h1>Prediction mode</h1>
{% if !message.is_empty() %}<p class="success">{{ message }}</p>{% endif %}
<form method="post" action="/mode">
<select name="mode">
{% for option in options %}<option value="{{ option.key }}"{% if option.selected %} selected{% endif %}>{{ option.name }}</option>
{% endfor %}</select>
<button type="submit">Save</button>
</form>"#,
    ext = "html"
)]
pub struct ModeTemplate<'a> {
    pub message: &'a str,
    pub options: Vec<ModeOption>,
}

impl<'a> ModeTemplate<'a> {
    pub fn new(modes: &[ModeInfo], current: PredictionMode, message: &'a str) -> Self {
        let options = modes
            .iter()
            .map(|info| ModeOption {
                key: info.mode.key(),
                name: info.display_name,
                selected: info.mode == current,
            })
            .collect();
        Self { message, options }
    }
}

#[derive(Template)]
#[template(
    source = r#"<div class="error"><h1>Error {{ status }}</h1><p>{{ message }}</p></div>"#,
    ext = "html"
)]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
