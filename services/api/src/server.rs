use crate::cli::ServeArgs;
use crate::infra::{AnalyticsCache, AppState, InMemoryListingStore};
use crate::routes::api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_market::analytics::AnalyticsEngine;
use job_market::config::AppConfig;
use job_market::error::AppError;
use job_market::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        store: Arc::new(InMemoryListingStore::default()),
        cache: Arc::new(AnalyticsCache::new(config.analytics.cache_ttl())),
        engine: Arc::new(AnalyticsEngine::standard()),
        batch_size: config.analytics.batch_size,
    };

    let app = api_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cache_ttl_hours = config.analytics.cache_ttl_hours,
        batch_size = config.analytics.batch_size,
        "job market analytics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
