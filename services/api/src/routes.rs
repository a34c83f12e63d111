use crate::infra::{AppState, InMemoryBnplLedger, InMemoryCollateralVault, InMemoryNftLedger};
use aura::error::AppError;
use aura::scoring::{
    aura_router, compute_aura_score, AuraFactor, AuraMetrics, AuraService, BnplLoan, NftLoan,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_aura_routes(
    service: Arc<AuraService<InMemoryBnplLedger, InMemoryCollateralVault, InMemoryNftLedger>>,
) -> axum::Router {
    aura_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/aura/score",
            axum::routing::post(score_payload_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless scoring request: callers supply the raw loan records, e.g. a
/// frontend that already fetched them from the chain.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) bnpl_loans: Vec<BnplLoan>,
    #[serde(default)]
    pub(crate) nft_loans: Vec<NftLoan>,
    /// Evaluation timestamp in unix seconds (defaults to now).
    #[serde(default)]
    pub(crate) now: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) score: u16,
    pub(crate) tier: &'static str,
    pub(crate) has_history: bool,
    pub(crate) evaluated_at: i64,
    pub(crate) factors: Vec<AuraFactor>,
    pub(crate) metrics: AuraMetrics,
}

pub(crate) async fn score_payload_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        bnpl_loans,
        nft_loans,
        now,
    } = payload;

    let now = now.unwrap_or_else(|| Utc::now().timestamp());
    let result = compute_aura_score(&bnpl_loans, &nft_loans, now)?;

    Ok(Json(ScoreResponse {
        score: result.score,
        tier: result.tier.label(),
        has_history: result.metrics.has_history,
        evaluated_at: now,
        factors: result.factors,
        metrics: result.metrics,
    }))
}
