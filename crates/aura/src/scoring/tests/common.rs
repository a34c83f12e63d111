use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::scoring::collector::{
    BnplLedger, CollateralVault, LedgerError, NftLedger,
};
use crate::scoring::domain::{BnplLoan, BnplStatus, NftLoan, NftStatus, WalletAddress};
use crate::scoring::service::AuraService;

/// Fixed evaluation timestamp so every expectation is exact.
pub(super) const NOW: i64 = 1_760_000_000;
pub(super) const DAY: i64 = 86_400;
pub(super) const WEI: u128 = 1_000_000_000_000_000_000;

pub(super) fn wallet(label: &str) -> WalletAddress {
    WalletAddress(label.to_string())
}

pub(super) fn bnpl(id: u64, status: BnplStatus, installments_paid: u8) -> BnplLoan {
    BnplLoan {
        id,
        status,
        installments_paid,
        product_price: WEI,
        next_due_timestamp: NOW + 7 * DAY,
        collateral_locked: false,
        created_at: NOW - 30 * DAY,
    }
}

pub(super) fn nft(id: u64, status: NftStatus) -> NftLoan {
    NftLoan {
        id,
        status,
        loan_amount: 5 * WEI,
        interest_amount: WEI / 10,
        total_repaid: 0,
        due_timestamp: NOW + 14 * DAY,
        created_at: NOW - 30 * DAY,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBnplLedger {
    pub(super) loans: Arc<Mutex<HashMap<WalletAddress, Vec<BnplLoan>>>>,
}

impl MemoryBnplLedger {
    pub(super) fn seed(&self, wallet: WalletAddress, loans: Vec<BnplLoan>) {
        self.loans
            .lock()
            .expect("ledger mutex poisoned")
            .insert(wallet, loans);
    }
}

impl BnplLedger for MemoryBnplLedger {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<BnplLoan>, LedgerError> {
        let guard = self.loans.lock().expect("ledger mutex poisoned");
        Ok(guard.get(wallet).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryVault {
    pub(super) locked: Arc<Mutex<HashMap<(WalletAddress, u64), bool>>>,
}

impl MemoryVault {
    pub(super) fn lock(&self, wallet: WalletAddress, loan_id: u64) {
        self.locked
            .lock()
            .expect("vault mutex poisoned")
            .insert((wallet, loan_id), true);
    }
}

impl CollateralVault for MemoryVault {
    fn is_locked(&self, wallet: &WalletAddress, loan_id: u64) -> Result<bool, LedgerError> {
        let guard = self.locked.lock().expect("vault mutex poisoned");
        Ok(*guard.get(&(wallet.clone(), loan_id)).unwrap_or(&false))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNftLedger {
    pub(super) loans: Arc<Mutex<HashMap<WalletAddress, Vec<NftLoan>>>>,
}

impl MemoryNftLedger {
    pub(super) fn seed(&self, wallet: WalletAddress, loans: Vec<NftLoan>) {
        self.loans
            .lock()
            .expect("ledger mutex poisoned")
            .insert(wallet, loans);
    }
}

impl NftLedger for MemoryNftLedger {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<NftLoan>, LedgerError> {
        let guard = self.loans.lock().expect("ledger mutex poisoned");
        Ok(guard.get(wallet).cloned().unwrap_or_default())
    }
}

/// Vault whose every lookup fails; exercises the fail-open policy.
pub(super) struct FailingVault;

impl CollateralVault for FailingVault {
    fn is_locked(&self, _wallet: &WalletAddress, _loan_id: u64) -> Result<bool, LedgerError> {
        Err(LedgerError::Unavailable("vault rpc timeout".to_string()))
    }
}

/// NFT ledger standing in for an older contract without the lookup.
pub(super) struct UnsupportedNftLedger;

impl NftLedger for UnsupportedNftLedger {
    fn loans_for(&self, _wallet: &WalletAddress) -> Result<Vec<NftLoan>, LedgerError> {
        Err(LedgerError::Unsupported)
    }
}

/// BNPL ledger that is hard down; its failure must propagate.
pub(super) struct UnavailableBnplLedger;

impl BnplLedger for UnavailableBnplLedger {
    fn loans_for(&self, _wallet: &WalletAddress) -> Result<Vec<BnplLoan>, LedgerError> {
        Err(LedgerError::Unavailable("bnpl rpc down".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<AuraService<MemoryBnplLedger, MemoryVault, MemoryNftLedger>>,
    MemoryBnplLedger,
    MemoryVault,
    MemoryNftLedger,
) {
    let bnpl_ledger = MemoryBnplLedger::default();
    let vault = MemoryVault::default();
    let nft_ledger = MemoryNftLedger::default();
    let service = Arc::new(AuraService::new(
        Arc::new(bnpl_ledger.clone()),
        Arc::new(vault.clone()),
        Arc::new(nft_ledger.clone()),
    ));
    (service, bnpl_ledger, vault, nft_ledger)
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
