use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBnplLedger, InMemoryCollateralVault, InMemoryNftLedger};
use crate::routes::with_aura_routes;
use aura::config::AppConfig;
use aura::error::AppError;
use aura::scoring::AuraService;
use aura::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let bnpl_ledger = Arc::new(InMemoryBnplLedger::default());
    let vault = Arc::new(InMemoryCollateralVault::default());
    let nft_ledger = Arc::new(InMemoryNftLedger::default());
    let aura_service = Arc::new(AuraService::new(bnpl_ledger, vault, nft_ledger));

    let app = with_aura_routes(aura_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "aura scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
