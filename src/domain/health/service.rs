use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};
use crate::domain::hashtag::HashtagService;

/// Upper bound for one upstream check
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Latency at or above which the upstream counts as degraded
const DEGRADED_THRESHOLD: Duration = Duration::from_secs(2);

/// How long a check result is reused
const CACHE_DURATION: Duration = Duration::from_secs(30);

struct CachedHealth {
    result: CheckResult,
    cached_at: Instant,
}

/// Health reporting with a cached upstream check
pub struct HealthService {
    hashtag_service: HashtagService,
    started_at: Instant,
    cache: RwLock<Option<CachedHealth>>,
}

impl HealthService {
    pub fn new(hashtag_service: HashtagService) -> Self {
        Self {
            hashtag_service,
            started_at: Instant::now(),
            cache: RwLock::new(None),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub async fn check_health(&self) -> HealthStatus {
        let upstream = self.check_upstream_cached().await;

        HealthStatus {
            status: determine_health_state(&upstream),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: self.uptime_secs(),
            checks: HealthChecks { upstream },
        }
    }

    async fn check_upstream_cached(&self) -> CheckResult {
        {
            let cached = self.cache.read().await;
            if let Some(ref c) = *cached {
                if c.cached_at.elapsed() < CACHE_DURATION {
                    tracing::debug!(
                        cache_age_secs = c.cached_at.elapsed().as_secs(),
                        "Using cached health check result"
                    );
                    return c.result.clone();
                }
            }
        }

        tracing::debug!("Performing fresh health check");
        let result = self.check_upstream_fresh().await;

        *self.cache.write().await = Some(CachedHealth {
            result: result.clone(),
            cached_at: Instant::now(),
        });

        result
    }

    async fn check_upstream_fresh(&self) -> CheckResult {
        let start = Instant::now();
        let result = timeout(HEALTH_CHECK_TIMEOUT, self.hashtag_service.health_check()).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(_)) => {
                tracing::info!(latency_ms, "Upstream health check passed");
                CheckResult::success(latency_ms)
            }
            Ok(Err(e)) => {
                tracing::warn!(latency_ms, error = %e, "Upstream health check failed");
                CheckResult::failure(latency_ms, e.message())
            }
            Err(_) => {
                tracing::warn!("Upstream health check timed out");
                CheckResult::timeout()
            }
        }
    }
}

fn determine_health_state(check: &CheckResult) -> HealthState {
    if !check.status {
        return HealthState::Unhealthy;
    }

    match check.latency_ms {
        Some(latency) if latency >= DEGRADED_THRESHOLD.as_millis() as u64 => HealthState::Degraded,
        _ => HealthState::Healthy,
    }
}
