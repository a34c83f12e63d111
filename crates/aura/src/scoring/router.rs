use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::collector::{BnplLedger, CollateralVault, NftLedger};
use super::domain::WalletAddress;
use super::engine::AuraResult;
use super::factors::AuraFactor;
use super::metrics::AuraMetrics;
use super::service::{AuraService, AuraServiceError};
use super::tiers::tier_info;

/// Router builder exposing the wallet scoring endpoint.
pub fn aura_router<B, V, N>(service: Arc<AuraService<B, V, N>>) -> Router
where
    B: BnplLedger + 'static,
    V: CollateralVault + 'static,
    N: NftLedger + 'static,
{
    Router::new()
        .route("/api/v1/aura/:wallet", get(score_handler::<B, V, N>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreQuery {
    /// Evaluation timestamp override in unix seconds (defaults to now).
    pub(crate) at: Option<i64>,
}

/// Serialized score for API responses.
///
/// A neutral "no history" score must be distinguishable from a failed
/// computation, so the history flag always travels with the score; failures
/// never produce a score at all.
#[derive(Debug, Clone, Serialize)]
pub struct AuraScoreView {
    pub wallet: String,
    pub score: u16,
    pub tier: &'static str,
    pub tier_description: &'static str,
    pub has_history: bool,
    pub evaluated_at: i64,
    pub factors: Vec<AuraFactor>,
    pub metrics: AuraMetrics,
}

impl AuraScoreView {
    pub fn from_result(wallet: &WalletAddress, result: AuraResult, evaluated_at: i64) -> Self {
        let AuraResult {
            score,
            tier,
            factors,
            metrics,
        } = result;

        Self {
            wallet: wallet.0.clone(),
            score,
            tier: tier.label(),
            tier_description: tier_info(tier).map(|info| info.description).unwrap_or(""),
            has_history: metrics.has_history,
            evaluated_at,
            factors,
            metrics,
        }
    }
}

pub(crate) async fn score_handler<B, V, N>(
    State(service): State<Arc<AuraService<B, V, N>>>,
    Path(wallet): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Response
where
    B: BnplLedger + 'static,
    V: CollateralVault + 'static,
    N: NftLedger + 'static,
{
    let wallet = WalletAddress(wallet);
    let now = query.at.unwrap_or_else(|| Utc::now().timestamp());

    match service.score_wallet(&wallet, now) {
        Ok(result) => {
            let view = AuraScoreView::from_result(&wallet, result, now);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AuraServiceError::Score(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AuraServiceError::Ledger(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
