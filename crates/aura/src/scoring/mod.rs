//! Wallet reputation scoring over BNPL and NFT-collateralized loan history.
//!
//! `engine::compute_aura_score` is the heart of the module: a pure function
//! from validated loan records and an explicit evaluation timestamp to a
//! score in `[0, 1000]`, a tier, and six audited factor contributions. The
//! collector, CSV import, and router wrap that core for callers that start
//! from ledgers, exports, or HTTP requests.

pub mod collector;
pub mod domain;
pub mod engine;
pub(crate) mod factors;
pub mod history_csv;
pub mod metrics;
pub mod router;
pub mod service;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use collector::{
    BnplLedger, CollateralVault, LedgerError, LoanHistory, LoanHistoryCollector, NftLedger,
};
pub use domain::{BnplLoan, BnplStatus, NftLoan, NftStatus, UnknownStatusCode, WalletAddress};
pub use engine::{compute_aura_score, AuraResult, ScoreError, BASE_SCORE, MAX_SCORE};
pub use factors::{AuraFactor, FactorKind};
pub use history_csv::HistoryCsvError;
pub use metrics::{aggregate, AuraMetrics, INSTALLMENTS_PER_LOAN};
pub use router::{aura_router, AuraScoreView};
pub use service::{AuraService, AuraServiceError};
pub use tiers::{tier_for_score, tier_info, AuraTier, TierInfo, AURA_TIERS};
