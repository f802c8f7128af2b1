//! Router construction and server lifecycle for both deployments.

use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    app::index,
    generate::{pages_function, worker_fetch},
    health::health_check,
    metrics::metrics,
};
use crate::services::NameGenerator;

pub const GENERATE_NAME_PATH: &str = "/api/generate-name";

pub const PAGES_SERVICE: &str = "namegen-pages";
pub const WORKER_SERVICE: &str = "namegen-worker";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: NameGenerator,
    pub service_name: &'static str,
}

impl AppState {
    pub fn new(generator: NameGenerator, service_name: &'static str) -> Self {
        Self {
            generator,
            service_name,
        }
    }
}

/// Pages deployment: form UI at `/`, the function at
/// [`GENERATE_NAME_PATH`].
pub fn build_pages_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route(GENERATE_NAME_PATH, any(pages_function))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics));

    with_observability(router).with_state(state)
}

/// Worker deployment: every request that is not a GET probe goes to the
/// handler, whatever its path.
pub fn build_worker_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check).fallback(worker_fetch))
        .route("/metrics", get(metrics).fallback(worker_fetch))
        .fallback(worker_fetch);

    with_observability(router).with_state(state)
}

fn with_observability(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the span above already sees the request id.
        .layer(from_fn(request_id_middleware))
}

/// Bind `address` and serve `router` until Ctrl+C or SIGTERM.
pub async fn serve(address: &str, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
