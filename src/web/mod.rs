//! Minimal web form over the power functions
//!
//! `GET /` renders an HTML page with one number input and the three result
//! lines. `/api/powers` answers the same computation as JSON.

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::power::{report, CalcError, Number, Power, Powers};

/// Form defaults shared by every request
#[derive(Debug, Clone, Copy)]
pub struct WebState {
    pub default_value: Number,
    pub step: i64,
}

impl From<&AppConfig> for WebState {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_value: config.default_value,
            step: config.step,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PowersResponse {
    pub value: Number,
    pub square: Power,
    pub cube: Power,
    pub fifth: Power,
    pub lines: [String; 3],
}

impl From<Powers> for PowersResponse {
    fn from(powers: Powers) -> Self {
        Self {
            value: powers.value,
            square: powers.square,
            cube: powers.cube,
            fifth: powers.fifth,
            lines: report::lines(&powers),
        }
    }
}

/// Request failure as a 422 JSON body
pub enum ApiError {
    Calc(CalcError),
    /// Body that is not JSON, or holds a number serde_json cannot represent
    Body(JsonRejection),
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        Self::Calc(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Body(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Calc(e) if e.is_type_error() => {
                tracing::debug!("Rejected non-numeric input: {}", e);
                e.to_string()
            }
            ApiError::Calc(e) => {
                tracing::debug!("Rejected out-of-range input: {}", e);
                e.to_string()
            }
            ApiError::Body(e) => {
                tracing::debug!("Rejected request body: {}", e);
                e.body_text()
            }
        };
        let body = serde_json::json!({ "error": message });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/api/powers", get(powers_query).post(powers_json))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(bind: &str, state: WebState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;

    tracing::info!("Serving power calculator on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down web form");
        })
        .await
        .context("Web server error")?;

    Ok(())
}

/// Parse the query value, falling back to the form default when absent
fn query_value(state: &WebState, query: &FormQuery) -> Result<Number, CalcError> {
    match query.value.as_deref() {
        None => Ok(state.default_value),
        Some(text) => text.parse(),
    }
}

async fn form_page(State(state): State<WebState>, Query(query): Query<FormQuery>) -> Response {
    let raw = query
        .value
        .clone()
        .unwrap_or_else(|| state.default_value.to_string());

    match query_value(&state, &query).and_then(Powers::compute) {
        Ok(powers) => Html(render_page(&raw, state.step, &report::lines(&powers), None)).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_page(&raw, state.step, &[], Some(&e))),
        )
            .into_response(),
    }
}

async fn powers_query(
    State(state): State<WebState>,
    Query(query): Query<FormQuery>,
) -> Result<Json<PowersResponse>, ApiError> {
    let value = query_value(&state, &query)?;
    Ok(Json(Powers::compute(value)?.into()))
}

async fn powers_json(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<PowersResponse>, ApiError> {
    let Json(body) = body?;
    let value = body
        .get("value")
        .ok_or_else(|| CalcError::invalid_input_type("missing \"value\""))?;
    let value = Number::try_from(value)?;
    Ok(Json(Powers::compute(value)?.into()))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn render_page(raw: &str, step: i64, lines: &[String], error: Option<&CalcError>) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&format!("    <p>{}</p>\n", escape_html(line)));
    }
    if let Some(e) = error {
        output.push_str(&format!("    <p class=\"error\">{}</p>\n", escape_html(&e.to_string())));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
    .error {{ color: #d35f5f; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{prompt}</p>
  <form method="get" action="/">
    <label for="value">{label}</label>
    <input type="number" id="value" name="value" value="{value}" step="{step}">
    <button type="submit">Calculate</button>
  </form>
  <div id="results">
{output}  </div>
</body>
</html>
"#,
        title = report::TITLE,
        prompt = report::PROMPT,
        label = report::INPUT_LABEL,
        value = escape_html(raw),
        step = step,
        output = output,
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
