use serde::{Deserialize, Serialize};

use super::domain::{BnplLoan, NftLoan};
use super::factors::{score_factors, AuraFactor};
use super::metrics::{aggregate, AuraMetrics, INSTALLMENTS_PER_LOAN};
use super::tiers::{tier_for_score, AuraTier};

/// Every wallet starts here; factors move the score up or down from this anchor.
pub const BASE_SCORE: u16 = 500;

/// Upper bound of the score range after clamping.
pub const MAX_SCORE: u16 = 1000;

/// Validation failure for malformed scoring input.
///
/// Invalid records fail fast instead of being coerced to zero; silent
/// coercion would corrupt the audit trail the factors exist to provide.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("evaluation timestamp must be positive, got {0}")]
    NonPositiveNow(i64),
    #[error("bnpl loan {id}: installments_paid {paid} exceeds the protocol maximum of 4")]
    InstallmentsOutOfRange { id: u64, paid: u8 },
    #[error("bnpl loan {id}: negative {field} timestamp")]
    NegativeBnplTimestamp { id: u64, field: &'static str },
    #[error("nft loan {id}: negative {field} timestamp")]
    NegativeNftTimestamp { id: u64, field: &'static str },
}

/// Terminal scoring output; immutable once produced. `factors` always holds
/// exactly six entries in the fixed display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraResult {
    pub score: u16,
    pub tier: AuraTier,
    pub factors: Vec<AuraFactor>,
    pub metrics: AuraMetrics,
}

/// Reduces a wallet's loan history to a bounded reputation score.
///
/// Pure and deterministic: identical inputs, including the caller-supplied
/// `now`, always yield an identical result. An empty history is the valid
/// new-wallet state and scores exactly [`BASE_SCORE`] with all factors zero.
pub fn compute_aura_score(
    bnpl: &[BnplLoan],
    nft: &[NftLoan],
    now: i64,
) -> Result<AuraResult, ScoreError> {
    validate(bnpl, nft, now)?;

    let metrics = aggregate(bnpl, nft, now);
    let (factors, delta) = score_factors(&metrics, now);
    let score = (i64::from(BASE_SCORE) + delta).clamp(0, i64::from(MAX_SCORE)) as u16;

    Ok(AuraResult {
        score,
        tier: tier_for_score(score),
        factors,
        metrics,
    })
}

fn validate(bnpl: &[BnplLoan], nft: &[NftLoan], now: i64) -> Result<(), ScoreError> {
    if now <= 0 {
        return Err(ScoreError::NonPositiveNow(now));
    }

    for loan in bnpl {
        if u32::from(loan.installments_paid) > INSTALLMENTS_PER_LOAN {
            return Err(ScoreError::InstallmentsOutOfRange {
                id: loan.id,
                paid: loan.installments_paid,
            });
        }
        if loan.created_at < 0 {
            return Err(ScoreError::NegativeBnplTimestamp {
                id: loan.id,
                field: "created_at",
            });
        }
        if loan.next_due_timestamp < 0 {
            return Err(ScoreError::NegativeBnplTimestamp {
                id: loan.id,
                field: "next_due_timestamp",
            });
        }
    }

    for loan in nft {
        if loan.created_at < 0 {
            return Err(ScoreError::NegativeNftTimestamp {
                id: loan.id,
                field: "created_at",
            });
        }
        if loan.due_timestamp < 0 {
            return Err(ScoreError::NegativeNftTimestamp {
                id: loan.id,
                field: "due_timestamp",
            });
        }
    }

    Ok(())
}
