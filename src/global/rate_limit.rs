//! IP-based rate limiting for the hashtag API.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::config::RateLimitSettings;
use crate::error::AppError;
use crate::response::BaseResponse;

/// Wraps `router` with a per-IP limiter.
///
/// Replenishes `per_second` tokens and allows bursts up to `burst_size`.
/// The client IP comes from `X-Forwarded-For`/`X-Real-IP` or the peer
/// address, so the server must be started with connect info.
pub fn apply_rate_limit<S>(router: Router<S>, settings: &RateLimitSettings) -> Result<Router<S>, AppError>
where
    S: Clone + Send + Sync + 'static,
{
    let config = GovernorConfigBuilder::default()
        .per_second(settings.per_second)
        .burst_size(settings.burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .error_handler(|err| RateLimitResponse::from(err).into_response())
        .finish()
        .ok_or_else(|| {
            AppError::Internal(format!(
                "invalid rate limit settings: per_second={}, burst_size={}",
                settings.per_second, settings.burst_size
            ))
        })?;

    Ok(router.layer(GovernorLayer {
        config: Arc::new(config),
    }))
}

#[derive(Debug)]
struct RateLimitResponse {
    retry_after: Option<u64>,
}

impl From<GovernorError> for RateLimitResponse {
    fn from(err: GovernorError) -> Self {
        match err {
            GovernorError::TooManyRequests { wait_time, .. } => Self {
                retry_after: Some(wait_time),
            },
            _ => Self { retry_after: None },
        }
    }
}

impl IntoResponse for RateLimitResponse {
    fn into_response(self) -> Response {
        tracing::warn!(retry_after_secs = ?self.retry_after, "Rate limit exceeded");
        metrics::counter!("rate_limit_rejections_total").increment(1);

        let body = BaseResponse::<()>::error(
            "RATE_LIMIT",
            "Too many requests. Please wait a moment and try again.",
        );

        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_limiter_from_settings() {
        let settings = RateLimitSettings {
            per_second: 2,
            burst_size: 10,
        };
        let router: Router = Router::new();
        assert!(apply_rate_limit(router, &settings).is_ok());
    }

    #[test]
    fn zero_burst_should_be_rejected() {
        let settings = RateLimitSettings {
            per_second: 2,
            burst_size: 0,
        };
        let router: Router = Router::new();
        let err = apply_rate_limit(router, &settings).unwrap_err();
        assert_eq!(err.error_code(), "COMMON500");
    }

    #[test]
    fn response_should_have_429_and_retry_after() {
        let response = RateLimitResponse {
            retry_after: Some(30),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get("Retry-After").unwrap().to_str().unwrap(),
            "30"
        );
    }

    #[test]
    fn response_without_wait_time_should_omit_header() {
        let response = RateLimitResponse { retry_after: None }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().get("Retry-After").is_none());
    }
}
