use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use aura::scoring::{
    BnplLedger, BnplLoan, CollateralVault, LedgerError, NftLedger, NftLoan, WalletAddress,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Ledger adapters backed by process memory. Production deployments replace
/// these with on-chain readers; tests and the demo seed them directly.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBnplLedger {
    loans: Arc<Mutex<HashMap<WalletAddress, Vec<BnplLoan>>>>,
}

impl InMemoryBnplLedger {
    pub(crate) fn seed(&self, wallet: WalletAddress, loans: Vec<BnplLoan>) {
        self.loans
            .lock()
            .expect("ledger mutex poisoned")
            .insert(wallet, loans);
    }
}

impl BnplLedger for InMemoryBnplLedger {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<BnplLoan>, LedgerError> {
        let guard = self.loans.lock().expect("ledger mutex poisoned");
        Ok(guard.get(wallet).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCollateralVault {
    locked: Arc<Mutex<HashMap<(WalletAddress, u64), bool>>>,
}

impl InMemoryCollateralVault {
    pub(crate) fn lock(&self, wallet: WalletAddress, loan_id: u64) {
        self.locked
            .lock()
            .expect("vault mutex poisoned")
            .insert((wallet, loan_id), true);
    }
}

impl CollateralVault for InMemoryCollateralVault {
    fn is_locked(&self, wallet: &WalletAddress, loan_id: u64) -> Result<bool, LedgerError> {
        let guard = self.locked.lock().expect("vault mutex poisoned");
        Ok(*guard.get(&(wallet.clone(), loan_id)).unwrap_or(&false))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNftLedger {
    loans: Arc<Mutex<HashMap<WalletAddress, Vec<NftLoan>>>>,
}

impl InMemoryNftLedger {
    pub(crate) fn seed(&self, wallet: WalletAddress, loans: Vec<NftLoan>) {
        self.loans
            .lock()
            .expect("ledger mutex poisoned")
            .insert(wallet, loans);
    }
}

impl NftLedger for InMemoryNftLedger {
    fn loans_for(&self, wallet: &WalletAddress) -> Result<Vec<NftLoan>, LedgerError> {
        let guard = self.loans.lock().expect("ledger mutex poisoned");
        Ok(guard.get(wallet).cloned().unwrap_or_default())
    }
}
