use serde::{Deserialize, Serialize};

use super::metrics::AuraMetrics;

/// The six factors contributing to an Aura score, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FactorKind {
    RepaymentReliability,
    PaymentDiscipline,
    BorrowingExperience,
    PortfolioDiversity,
    CollateralBehavior,
    NftTrackRecord,
}

impl FactorKind {
    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::RepaymentReliability => "Repayment Reliability",
            FactorKind::PaymentDiscipline => "Payment Discipline",
            FactorKind::BorrowingExperience => "Borrowing Experience",
            FactorKind::PortfolioDiversity => "Portfolio Diversity",
            FactorKind::CollateralBehavior => "Collateral Behavior",
            FactorKind::NftTrackRecord => "NFT Lending Track Record",
        }
    }

    pub const fn weight_percent(self) -> u8 {
        match self {
            FactorKind::RepaymentReliability => 40,
            FactorKind::PaymentDiscipline => 25,
            FactorKind::BorrowingExperience => 15,
            FactorKind::PortfolioDiversity => 8,
            FactorKind::CollateralBehavior => 6,
            FactorKind::NftTrackRecord => 6,
        }
    }
}

/// Discrete, clamped contribution to an Aura score, allowing transparent
/// audits of how a wallet earned its number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraFactor {
    pub kind: FactorKind,
    pub score: i32,
    pub min_score: i32,
    pub max_score: i32,
    pub weight_percent: u8,
    pub notes: String,
}

impl AuraFactor {
    fn new(kind: FactorKind, score: i64, min_score: i32, max_score: i32, notes: String) -> Self {
        Self {
            kind,
            score: score as i32,
            min_score,
            max_score,
            weight_percent: kind.weight_percent(),
            notes,
        }
    }
}

/// Computes the six factor contributions from aggregated metrics.
///
/// Each factor is clamped to its documented range before it enters the sum.
/// Ratios round half away from zero; all other arithmetic is integral, so
/// identical inputs always produce identical factor values.
pub(crate) fn score_factors(m: &AuraMetrics, now: i64) -> (Vec<AuraFactor>, i64) {
    let mut factors = Vec::with_capacity(6);

    // Factor 1: repayment reliability. Share of closed loans repaid, with a
    // heavy per-default penalty on top.
    let closed = i64::from(m.repaid_bnpl_loans)
        + i64::from(m.defaulted_bnpl_loans)
        + i64::from(m.repaid_nft_loans)
        + i64::from(m.defaulted_nft_loans);
    let repaid = i64::from(m.repaid_bnpl_loans) + i64::from(m.repaid_nft_loans);
    let defaulted = i64::from(m.defaulted_bnpl_loans) + i64::from(m.defaulted_nft_loans);

    let mut f1: i64 = 0;
    if closed > 0 {
        let repay_ratio = repaid as f64 / closed as f64;
        f1 = if repay_ratio >= 1.0 {
            200
        } else if repay_ratio >= 0.9 {
            170
        } else if repay_ratio >= 0.8 {
            130
        } else if repay_ratio >= 0.6 {
            60
        } else if repay_ratio >= 0.4 {
            0
        } else {
            -100
        };
        f1 -= defaulted * 75;
    }
    let f1 = f1.clamp(-300, 200);
    factors.push(AuraFactor::new(
        FactorKind::RepaymentReliability,
        f1,
        -300,
        200,
        format!("{repaid}/{closed} loans repaid, {defaulted} defaults"),
    ));

    // Factor 2: payment discipline. Installment completion rate, overdue
    // penalties, small boosts for active loans that are current.
    let mut f2: i64 = 0;
    if m.max_possible_installments > 0 {
        let installment_ratio =
            f64::from(m.total_installments_paid) / f64::from(m.max_possible_installments);
        f2 = (installment_ratio * 200.0).round() as i64 - 50;
    }
    f2 -= i64::from(m.late_bnpl_loans) * 30;
    f2 -= i64::from(m.late_nft_loans) * 25;
    f2 += i64::from(m.on_time_bnpl_loans) * 10;
    f2 += i64::from(m.on_time_nft_loans) * 8;
    let f2 = f2.clamp(-100, 150);
    factors.push(AuraFactor::new(
        FactorKind::PaymentDiscipline,
        f2,
        -100,
        150,
        format!(
            "{}/{} installments paid, {} overdue",
            m.total_installments_paid,
            m.max_possible_installments,
            m.late_bnpl_loans + m.late_nft_loans
        ),
    ));

    // Factor 3: borrowing experience. Loan-count tier plus an account-age
    // bonus of +5 per 30 days of history, capped at +20.
    let total_loans = m.total_bnpl_loans + m.total_nft_loans;
    let mut f3: i64 = if total_loans >= 10 {
        100
    } else if total_loans >= 7 {
        80
    } else if total_loans >= 5 {
        60
    } else if total_loans >= 3 {
        40
    } else if total_loans >= 2 {
        25
    } else if total_loans >= 1 {
        10
    } else {
        0
    };
    if m.first_loan_timestamp > 0 {
        let age_days = (now - m.first_loan_timestamp) as f64 / 86_400.0;
        f3 += i64::min(20, (age_days / 30.0).floor() as i64 * 5);
    }
    let f3 = f3.clamp(0, 100);
    factors.push(AuraFactor::new(
        FactorKind::BorrowingExperience,
        f3,
        0,
        100,
        format!("{total_loans} total loans taken"),
    ));

    // Factor 4: portfolio diversity.
    let has_bnpl = m.total_bnpl_loans > 0;
    let has_nft = m.total_nft_loans > 0;
    let f4: i64 = if has_bnpl && has_nft {
        50
    } else if has_bnpl || has_nft {
        20
    } else {
        0
    };
    let diversity_notes = if has_bnpl && has_nft {
        "both BNPL and NFT loans used"
    } else if has_bnpl {
        "BNPL only"
    } else if has_nft {
        "NFT only"
    } else {
        "no loans"
    };
    factors.push(AuraFactor::new(
        FactorKind::PortfolioDiversity,
        f4,
        0,
        50,
        diversity_notes.to_string(),
    ));

    // Factor 5: collateral behavior. Claiming collateral after repayment is
    // rewarded; liquidated collateral is penalized. The denominator floors
    // at one, matching the on-chain bookkeeping this mirrors.
    let mut f5: i64 = 0;
    let collateral_events = m.collateral_claimed + m.collateral_locked + m.defaulted_bnpl_loans;
    if collateral_events > 0 {
        let claim_ratio =
            f64::from(m.collateral_claimed) / f64::from(u32::max(1, m.repaid_bnpl_loans));
        f5 = (claim_ratio * 50.0).round() as i64;
        f5 -= i64::from(m.defaulted_bnpl_loans) * 25;
    }
    let f5 = f5.clamp(-50, 50);
    factors.push(AuraFactor::new(
        FactorKind::CollateralBehavior,
        f5,
        -50,
        50,
        format!(
            "{} claimed, {} still locked",
            m.collateral_claimed, m.collateral_locked
        ),
    ));

    // Factor 6: NFT lending track record. The default subtraction applies
    // whether or not any NFT loan has closed yet.
    let mut f6: i64 = 0;
    if m.total_nft_loans > 0 {
        let nft_closed = i64::from(m.repaid_nft_loans) + i64::from(m.defaulted_nft_loans);
        if nft_closed > 0 {
            let nft_repay_ratio = f64::from(m.repaid_nft_loans) / nft_closed as f64;
            f6 = (nft_repay_ratio * 80.0).round() as i64 - 30;
        }
        f6 -= i64::from(m.defaulted_nft_loans) * 20;
    }
    let f6 = f6.clamp(-50, 50);
    let nft_notes = if m.total_nft_loans > 0 {
        format!("{}/{} NFT loans repaid", m.repaid_nft_loans, m.total_nft_loans)
    } else {
        "no NFT lending history".to_string()
    };
    factors.push(AuraFactor::new(
        FactorKind::NftTrackRecord,
        f6,
        -50,
        50,
        nft_notes,
    ));

    let delta = f1 + f2 + f3 + f4 + f5 + f6;
    (factors, delta)
}
