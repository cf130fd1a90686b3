use axum::{extract::State, http::StatusCode, Json};

use super::dto::{HealthState, HealthStatus};
use crate::AppState;

/// Server and upstream health
///
/// Returns 503 when the AI service is unreachable or not configured.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Healthy or degraded", body = HealthStatus),
        (status = 503, description = "Unhealthy", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.health_service.check_health().await;

    let code = match status.status {
        HealthState::Healthy | HealthState::Degraded => StatusCode::OK,
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(status))
}
