use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{BnplLoan, NftLoan, WalletAddress};

/// Read access to the BNPL loan ledger.
pub trait BnplLedger: Send + Sync {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<BnplLoan>, LedgerError>;
}

/// Per-loan collateral custody lookups.
pub trait CollateralVault: Send + Sync {
    fn is_locked(&self, wallet: &WalletAddress, loan_id: u64) -> Result<bool, LedgerError>;
}

/// Read access to the NFT-collateralized loan ledger.
pub trait NftLedger: Send + Sync {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<NftLoan>, LedgerError>;
}

/// Error enumeration for ledger lookups.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    #[error("lookup not supported by the deployed contract")]
    Unsupported,
}

/// A wallet's complete loan history as assembled from the ledgers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanHistory {
    pub bnpl: Vec<BnplLoan>,
    pub nft: Vec<NftLoan>,
}

/// Gathers a wallet's loan records ahead of scoring.
///
/// Fallback policy per lookup:
///
/// | lookup                   | on failure           |
/// |--------------------------|----------------------|
/// | BNPL loan list           | propagate (critical) |
/// | per-loan collateral lock | treat as unlocked    |
/// | NFT loan list            | treat as empty       |
///
/// Collateral-lock status only feeds one minor factor, and older NFT loan
/// contracts lack the borrower-loans lookup entirely, so neither failure is
/// allowed to sink the whole computation.
pub struct LoanHistoryCollector<B, V, N> {
    bnpl: Arc<B>,
    vault: Arc<V>,
    nft: Arc<N>,
}

impl<B, V, N> LoanHistoryCollector<B, V, N>
where
    B: BnplLedger,
    V: CollateralVault,
    N: NftLedger,
{
    pub fn new(bnpl: Arc<B>, vault: Arc<V>, nft: Arc<N>) -> Self {
        Self { bnpl, vault, nft }
    }

    pub fn collect(&self, wallet: &WalletAddress) -> Result<LoanHistory, LedgerError> {
        let mut bnpl = self.bnpl.loans_for(wallet)?;

        for loan in &mut bnpl {
            loan.collateral_locked = match self.vault.is_locked(wallet, loan.id) {
                Ok(locked) => locked,
                Err(err) => {
                    warn!(loan = loan.id, %err, "collateral lookup failed, treating as unlocked");
                    false
                }
            };
        }

        let nft = match self.nft.loans_for(wallet) {
            Ok(loans) => loans,
            Err(err) => {
                warn!(wallet = %wallet.0, %err, "nft loan lookup failed, scoring BNPL history only");
                Vec::new()
            }
        };

        Ok(LoanHistory { bnpl, nft })
    }
}
