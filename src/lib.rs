pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod logging;
pub mod response;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::domain::hashtag::{AiClient, ContentExtractor, HashtagService};
use crate::domain::health::HealthService;
use crate::error::AppError;
use crate::global::middleware::request_tracing;
use crate::global::rate_limit::apply_rate_limit;

/// Slack on top of the AI timeout before the whole request is abandoned
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub hashtag_service: Arc<HashtagService>,
    pub content_extractor: Arc<ContentExtractor>,
    pub health_service: Arc<HealthService>,
}

impl AppState {
    pub fn new(client: AiClient) -> Result<Self, AppError> {
        let hashtag_service = HashtagService::new(client);
        Ok(Self {
            health_service: Arc::new(HealthService::new(hashtag_service.clone())),
            hashtag_service: Arc::new(hashtag_service),
            content_extractor: Arc::new(ContentExtractor::new()?),
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hashtag Generator API",
        description = "Generates social media hashtags from a content description"
    ),
    paths(
        domain::hashtag::handler::generate_hashtags,
        domain::hashtag::handler::extract_content,
        domain::hashtag::handler::list_platforms,
        domain::health::handler::health_check,
    ),
    components(
        schemas(
            domain::hashtag::dto::GenerateHashtagsRequest,
            domain::hashtag::dto::GenerateHashtagsResponse,
            domain::hashtag::dto::GenerateHashtagsSuccessResponse,
            domain::hashtag::dto::ExtractContentRequest,
            domain::hashtag::dto::ExtractContentResponse,
            domain::hashtag::dto::ExtractContentSuccessResponse,
            domain::hashtag::dto::CatalogResponse,
            domain::hashtag::dto::CatalogSuccessResponse,
            domain::hashtag::dto::PlatformInfo,
            domain::hashtag::dto::CategoryInfo,
            domain::hashtag::platform::Platform,
            domain::hashtag::platform::Category,
            domain::hashtag::model::ContentSource,
            domain::health::dto::HealthStatus,
            domain::health::dto::HealthState,
            domain::health::dto::HealthChecks,
            domain::health::dto::CheckResult,
            response::ErrorResponse,
        )
    ),
    tags(
        (name = "Hashtag", description = "Hashtag generation API"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Routes that reach the AI service or fetch remote pages
fn upstream_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/hashtags/generate",
            post(domain::hashtag::handler::generate_hashtags),
        )
        .route(
            "/api/hashtags/extract",
            post(domain::hashtag::handler::extract_content),
        )
}

fn build_router(upstream: Router<AppState>, state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::handler::health_check))
        .route(
            "/api/hashtags/platforms",
            get(domain::hashtag::handler::list_platforms),
        )
        .merge(upstream)
        .with_state(state)
}

/// Router without rate limiting or metrics export, for in-process tests
pub fn create_router(state: AppState) -> Router {
    build_router(upstream_routes(), state).layer(middleware::from_fn(request_tracing))
}

/// Full application router.
///
/// Generation and extraction are rate limited per client IP, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_app(
    state: AppState,
    config: &AppConfig,
    metrics_handle: PrometheusHandle,
) -> Result<Router, AppError> {
    let upstream = apply_rate_limit(upstream_routes(), &config.rate_limit)?;

    let metrics = Router::new().route(
        "/metrics",
        get(move || std::future::ready(metrics_handle.render())),
    );

    Ok(build_router(upstream, state)
        .merge(metrics)
        .layer(TimeoutLayer::new(config.ai.timeout + REQUEST_TIMEOUT_SLACK))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_tracing)))
}
