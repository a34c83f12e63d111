use std::sync::Arc;

use super::collector::{BnplLedger, CollateralVault, LedgerError, LoanHistoryCollector, NftLedger};
use super::domain::WalletAddress;
use super::engine::{compute_aura_score, AuraResult, ScoreError};

/// Service composing the loan-history collector with the scoring engine.
///
/// Scoring itself is pure; the service only adds the ledger round trips, so
/// it is safe to share across request handlers without coordination.
pub struct AuraService<B, V, N> {
    collector: LoanHistoryCollector<B, V, N>,
}

impl<B, V, N> AuraService<B, V, N>
where
    B: BnplLedger + 'static,
    V: CollateralVault + 'static,
    N: NftLedger + 'static,
{
    pub fn new(bnpl: Arc<B>, vault: Arc<V>, nft: Arc<N>) -> Self {
        Self {
            collector: LoanHistoryCollector::new(bnpl, vault, nft),
        }
    }

    /// Fetch a wallet's full loan history and score it as of `now`.
    pub fn score_wallet(
        &self,
        wallet: &WalletAddress,
        now: i64,
    ) -> Result<AuraResult, AuraServiceError> {
        let history = self.collector.collect(wallet)?;
        let result = compute_aura_score(&history.bnpl, &history.nft, now)?;
        Ok(result)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum AuraServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
