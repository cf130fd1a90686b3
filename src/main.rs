use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;

use hashtag_server::config::AppConfig;
use hashtag_server::domain::hashtag::ChatCompletionClient;
use hashtag_server::logging::init_logging;
use hashtag_server::shutdown::shutdown_signal;
use hashtag_server::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(config.log_format);
    tracing::debug!(config = ?config, "Configuration loaded");

    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    let client = ChatCompletionClient::new(&config.ai);
    if client.is_configured() {
        tracing::info!(model = client.model(), "AI client configured");
    } else {
        tracing::warn!(
            "GEMINI_API_KEY is not set; generation requests will fail until it is configured"
        );
    }

    let state = AppState::new(Arc::new(client))?;
    let app = create_app(state, &config, metrics_handle)?;

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Server listening on {}; Swagger UI at /swagger-ui",
        listener.local_addr()?
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
