//! Request tracing middleware.

use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID header name, echoed on every response
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each request with a UUID, logs start and completion inside an
/// `http_request` span, and records request count and latency metrics.
pub async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        tracing::info!("Request started");
        let start = Instant::now();

        let mut response = next.run(request).await;

        let duration = start.elapsed();
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );

        record_request_metrics(method.as_str(), &path, status.as_u16(), duration);

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

fn record_request_metrics(method: &str, path: &str, status: u16, duration: Duration) {
    let status = status.to_string();
    let path = normalize_path(path);

    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path,
        "status" => status
    )
    .record(duration.as_secs_f64());
}

/// Caps paths at three segments to keep metric label cardinality bounded
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() <= 3 {
        path.to_string()
    } else {
        format!("/{}", segments[..3].join("/"))
    }
}
