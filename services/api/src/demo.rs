use std::path::PathBuf;
use std::sync::Arc;

use aura::error::AppError;
use aura::scoring::{
    compute_aura_score, history_csv, AuraResult, AuraService, BnplLoan, BnplStatus, NftLoan,
    NftStatus, WalletAddress,
};
use chrono::Utc;
use clap::Args;

use crate::infra::{InMemoryBnplLedger, InMemoryCollateralVault, InMemoryNftLedger};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to the loan-history CSV export
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Evaluation timestamp in unix seconds (defaults to now)
    #[arg(long)]
    pub(crate) now: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation timestamp in unix seconds (defaults to now)
    #[arg(long)]
    pub(crate) now: Option<i64>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { history, now } = args;

    let now = now.unwrap_or_else(|| Utc::now().timestamp());
    let records = history_csv::from_path(&history)?;
    let result = compute_aura_score(&records.bnpl, &records.nft, now)?;

    println!("Aura score for {}", history.display());
    render_result(&result, now);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(|| Utc::now().timestamp());
    let day = 86_400;

    let bnpl_ledger = Arc::new(InMemoryBnplLedger::default());
    let vault = Arc::new(InMemoryCollateralVault::default());
    let nft_ledger = Arc::new(InMemoryNftLedger::default());

    let reliable = WalletAddress("0xreliable".to_string());
    bnpl_ledger.seed(
        reliable.clone(),
        vec![
            demo_bnpl(1, BnplStatus::Repaid, 4, now - 180 * day, 0),
            demo_bnpl(2, BnplStatus::Repaid, 4, now - 120 * day, 0),
            demo_bnpl(3, BnplStatus::Repaid, 4, now - 60 * day, 0),
            demo_bnpl(4, BnplStatus::Active, 2, now - 20 * day, now + 10 * day),
        ],
    );
    // One repaid purchase whose collateral is still sitting in the vault.
    vault.lock(reliable.clone(), 3);
    nft_ledger.seed(
        reliable.clone(),
        vec![demo_nft(5, NftStatus::Repaid, now - 90 * day, now - 60 * day)],
    );

    let risky = WalletAddress("0xrisky".to_string());
    bnpl_ledger.seed(
        risky.clone(),
        vec![
            demo_bnpl(6, BnplStatus::Defaulted, 1, now - 200 * day, now - 170 * day),
            demo_bnpl(7, BnplStatus::Active, 1, now - 40 * day, now - 5 * day),
        ],
    );
    nft_ledger.seed(
        risky.clone(),
        vec![demo_nft(8, NftStatus::Liquidated, now - 150 * day, now - 120 * day)],
    );

    let service = AuraService::new(bnpl_ledger, vault, nft_ledger);

    for wallet in [reliable, risky] {
        let result = service
            .score_wallet(&wallet, now)
            .map_err(AppError::from)?;
        println!("\nAura score for {}", wallet.0);
        render_result(&result, now);
    }

    Ok(())
}

fn render_result(result: &AuraResult, now: i64) {
    println!(
        "  score {} / 1000  ({} Aura, evaluated at {now})",
        result.score,
        result.tier.label()
    );

    if !result.metrics.has_history {
        println!("  no on-chain borrowing history; score is the neutral baseline");
        return;
    }

    println!("  factors:");
    for factor in &result.factors {
        println!(
            "    {:<26} {:>4}  (range {}..{}, weight {}%)  {}",
            factor.kind.label(),
            factor.score,
            factor.min_score,
            factor.max_score,
            factor.weight_percent,
            factor.notes
        );
    }

    let m = &result.metrics;
    println!(
        "  history: {} BNPL loans ({} repaid, {} defaulted), {} NFT loans ({} repaid, {} defaulted/liquidated)",
        m.total_bnpl_loans,
        m.repaid_bnpl_loans,
        m.defaulted_bnpl_loans,
        m.total_nft_loans,
        m.repaid_nft_loans,
        m.defaulted_nft_loans
    );
}

fn demo_bnpl(
    id: u64,
    status: BnplStatus,
    installments_paid: u8,
    created_at: i64,
    next_due_timestamp: i64,
) -> BnplLoan {
    BnplLoan {
        id,
        status,
        installments_paid,
        product_price: 250_000_000_000_000_000,
        next_due_timestamp,
        collateral_locked: false,
        created_at,
    }
}

fn demo_nft(id: u64, status: NftStatus, created_at: i64, due_timestamp: i64) -> NftLoan {
    NftLoan {
        id,
        status,
        loan_amount: 1_500_000_000_000_000_000,
        interest_amount: 75_000_000_000_000_000,
        total_repaid: 0,
        due_timestamp,
        created_at,
    }
}
