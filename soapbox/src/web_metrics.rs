use std::{future::ready, net::SocketAddr, time::Instant};

use axum::{
    extract::{MatchedPath, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::IntoResponse,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

const REQUEST_COUNTER: &str = "soapbox_http_requests_total";
const REQUEST_LATENCY: &str = "soapbox_http_requests_duration_seconds";

/// Histogram bounds in seconds. Requests past the last bucket are a problem
/// no finer boundary would make clearer.
const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// The matched route template, so `/delete_complaint/{id}` stays one series
/// no matter how many ids pass through it. Unrouted requests fall back to
/// the raw path.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned())
}

/// Middleware counting every request and timing it end to end.
pub(crate) async fn track_metrics(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();
    let path = route_label(&req);
    let method = req.method().to_string();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let response = next.run(req).await;

    let labels = [
        ("method", method),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
        ("user_agent", user_agent),
    ];
    metrics::counter!(REQUEST_COUNTER, &labels).increment(1);
    metrics::histogram!(REQUEST_LATENCY, &labels).record(start.elapsed().as_secs_f64());

    response
}

fn install_recorder() -> PrometheusHandle {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_LATENCY.to_string()), LATENCY_BUCKETS)
        .unwrap()
        .install_recorder()
        .unwrap()
}

/// Serves /metrics on its own port so the scrape endpoint never shows up on
/// the public listener.
pub(crate) async fn start_metrics_server() {
    let handle = install_recorder();
    let app = Router::new().route("/metrics", get(move || ready(handle.render())));

    let addr = SocketAddr::from(([0, 0, 0, 0], 9091));
    tracing::debug!("metrics listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap()
}
