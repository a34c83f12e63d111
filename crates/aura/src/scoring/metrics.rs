use serde::{Deserialize, Serialize};

use super::domain::{BnplLoan, BnplStatus, NftLoan, NftStatus};

/// Reduction of a wallet's complete loan history into scoring inputs.
///
/// Recomputed in full on every scoring call; it has no lifecycle of its own
/// and is never persisted. The all-zero struct with `has_history = false` is
/// the valid "new wallet" state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraMetrics {
    pub total_bnpl_loans: u32,
    pub active_bnpl_loans: u32,
    pub repaid_bnpl_loans: u32,
    pub defaulted_bnpl_loans: u32,
    pub total_installments_paid: u32,
    pub max_possible_installments: u32,
    pub total_bnpl_volume: u128,
    pub on_time_bnpl_loans: u32,
    pub late_bnpl_loans: u32,
    /// Repaid loans whose collateral the borrower has already reclaimed.
    pub collateral_claimed: u32,
    /// Repaid loans whose collateral is still sitting in the vault.
    pub collateral_locked: u32,
    pub total_nft_loans: u32,
    pub active_nft_loans: u32,
    pub repaid_nft_loans: u32,
    /// Counts both defaulted and liquidated NFT loans.
    pub defaulted_nft_loans: u32,
    pub total_nft_volume: u128,
    pub on_time_nft_loans: u32,
    pub late_nft_loans: u32,
    /// Earliest positive `created_at` across both ledgers; zero without one.
    pub first_loan_timestamp: i64,
    pub has_history: bool,
}

/// Every BNPL loan carries exactly four installments by protocol design.
pub const INSTALLMENTS_PER_LOAN: u32 = 4;

/// Reduces raw loan records into [`AuraMetrics`] as of `now`.
///
/// Overdue detection is strictly `due < now`: a loan due exactly at `now`
/// still counts as on time.
pub fn aggregate(bnpl: &[BnplLoan], nft: &[NftLoan], now: i64) -> AuraMetrics {
    let mut m = AuraMetrics::default();
    let mut first_timestamp: Option<i64> = None;

    for loan in bnpl {
        m.total_bnpl_loans += 1;
        m.total_installments_paid += u32::from(loan.installments_paid);
        m.max_possible_installments += INSTALLMENTS_PER_LOAN;
        m.total_bnpl_volume += loan.product_price;

        if loan.created_at > 0 {
            first_timestamp = Some(match first_timestamp {
                Some(first) => first.min(loan.created_at),
                None => loan.created_at,
            });
        }

        match loan.status {
            BnplStatus::Active => {
                m.active_bnpl_loans += 1;
                if loan.next_due_timestamp < now {
                    m.late_bnpl_loans += 1;
                } else {
                    m.on_time_bnpl_loans += 1;
                }
            }
            BnplStatus::Repaid => {
                m.repaid_bnpl_loans += 1;
                if loan.collateral_locked {
                    m.collateral_locked += 1;
                } else {
                    m.collateral_claimed += 1;
                }
            }
            BnplStatus::Defaulted => m.defaulted_bnpl_loans += 1,
        }
    }

    for loan in nft {
        m.total_nft_loans += 1;
        m.total_nft_volume += loan.loan_amount;

        if loan.created_at > 0 {
            first_timestamp = Some(match first_timestamp {
                Some(first) => first.min(loan.created_at),
                None => loan.created_at,
            });
        }

        match loan.status {
            NftStatus::Active => {
                m.active_nft_loans += 1;
                if loan.due_timestamp < now {
                    m.late_nft_loans += 1;
                } else {
                    m.on_time_nft_loans += 1;
                }
            }
            NftStatus::Repaid => m.repaid_nft_loans += 1,
            NftStatus::Defaulted | NftStatus::Liquidated => m.defaulted_nft_loans += 1,
        }
    }

    m.first_loan_timestamp = first_timestamp.unwrap_or(0);
    m.has_history = m.total_bnpl_loans + m.total_nft_loans > 0;
    m
}
