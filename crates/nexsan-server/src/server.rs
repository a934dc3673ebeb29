//! Axum router and request handlers

use crate::metrics::ProbeOutcome;
use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use nexsan_client::Credentials;
use nexsan_metrics::{exposition, translate};
use serde::Deserialize;
use std::time::Instant;
use tower_http::trace::TraceLayer;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Nexsan exporter</title>
<style>
form { display: grid; grid-template-columns: 175px 175px; grid-gap: 16px; }
label { grid-column: 1 / 2; text-align: right; }
input, button { grid-column: 2 / 3; }
</style>
</head>
<body>
<h1>Nexsan Exporter</h1>
<p>Use this form to probe an array:</p>
<form method="get" action="/probe">
<label for="target">Probe address:</label>
<input type="text" id="target" name="target" required placeholder="192.0.2.1">
<label for="user">User:</label>
<input type="text" id="user" name="user" required placeholder="admin">
<label for="pass">Password:</label>
<input type="password" id="pass" name="pass" required>
<button type="submit">Probe</button>
</form>
<hr>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

/// Query string of `/probe`
#[derive(Debug, Default, Deserialize)]
pub struct ProbeParams {
    pub target: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// Build the exporter's router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/probe", get(probe))
        .route("/metrics", get(self_metrics))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Landing page with a probe form
async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /probe - Fetch a status document and expose its metrics
async fn probe(State(app): State<SharedState>, Query(params): Query<ProbeParams>) -> Response {
    let (target, user, pass) = match (params.target, params.user, params.pass) {
        (Some(target), Some(user), Some(pass)) if !target.trim().is_empty() => {
            (target, user, pass)
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Missing required parameters: target, user, pass\n",
            )
                .into_response()
        }
    };

    let started = Instant::now();
    let credentials = Credentials::new(user, pass);
    match app.client.fetch(&target, &credentials).await {
        Ok(tree) => {
            let families = translate(&tree);
            app.metrics.observe(ProbeOutcome::Success, started.elapsed());
            tracing::debug!(
                "Probe of {} produced {} families, {} samples",
                target,
                families.len(),
                families.sample_count()
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
                exposition::encode(&families),
            )
                .into_response()
        }
        Err(e) => {
            app.metrics.observe(ProbeOutcome::Failure, started.elapsed());
            tracing::warn!("Probe of {} failed: {}", target, e);
            (StatusCode::BAD_GATEWAY, format!("{}\n", e)).into_response()
        }
    }
}

/// GET /metrics - The exporter's own metrics
async fn self_metrics(State(app): State<SharedState>) -> Response {
    match app.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode self metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
