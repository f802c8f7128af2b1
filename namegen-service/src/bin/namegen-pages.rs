use namegen_service::config::PagesSettings;
use namegen_service::services::{metrics, NameGenerator};
use namegen_service::startup::{build_pages_router, serve, AppState, PAGES_SERVICE};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = PagesSettings::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing(
        PAGES_SERVICE,
        &settings.server.log_level,
        otlp_endpoint.as_deref(),
    )?;

    metrics::init_metrics()?;

    let generator = NameGenerator::from_config(&settings.upstream)?;
    tracing::info!(
        api_url = %settings.upstream.api_url,
        model = %settings.upstream.model,
        timeout_secs = settings.upstream.timeout_secs,
        "Initialized upstream provider"
    );

    let app = build_pages_router(AppState::new(generator, PAGES_SERVICE));

    serve(&settings.server.address(), app).await
}
