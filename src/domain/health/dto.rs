use serde::Serialize;
use utoipa::ToSchema;

/// Overall health response
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// healthy / degraded / unhealthy
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// AI service reachability
    pub upstream: CheckResult,
}

/// Result of a single dependency check
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 150)]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, error: String) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some(error),
        }
    }

    pub fn timeout() -> Self {
        Self {
            status: false,
            latency_ms: None,
            error: Some("Health check timed out".to_string()),
        }
    }
}
