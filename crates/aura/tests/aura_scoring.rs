//! End-to-end expectations for the Aura scoring engine, exercised through
//! the public facade the way a request handler or CLI would call it.

use aura::scoring::{
    compute_aura_score, AuraTier, BnplLoan, BnplStatus, FactorKind, NftLoan, NftStatus,
    BASE_SCORE,
};

const NOW: i64 = 1_760_000_000;
const DAY: i64 = 86_400;
const WEI: u128 = 1_000_000_000_000_000_000;

fn repaid_bnpl(id: u64, created_at: i64) -> BnplLoan {
    BnplLoan {
        id,
        status: BnplStatus::Repaid,
        installments_paid: 4,
        product_price: WEI,
        next_due_timestamp: 0,
        collateral_locked: false,
        created_at,
    }
}

fn active_bnpl(id: u64, next_due_timestamp: i64) -> BnplLoan {
    BnplLoan {
        id,
        status: BnplStatus::Active,
        installments_paid: 2,
        product_price: WEI,
        next_due_timestamp,
        collateral_locked: false,
        created_at: NOW - DAY,
    }
}

fn nft_loan(id: u64, status: NftStatus) -> NftLoan {
    NftLoan {
        id,
        status,
        loan_amount: 3 * WEI,
        interest_amount: WEI / 20,
        total_repaid: 0,
        due_timestamp: NOW + 14 * DAY,
        created_at: NOW - DAY,
    }
}

fn factor(result: &aura::scoring::AuraResult, kind: FactorKind) -> i32 {
    result
        .factors
        .iter()
        .find(|factor| factor.kind == kind)
        .expect("factor present")
        .score
}

#[test]
fn identical_inputs_always_yield_identical_results() {
    let bnpl = vec![
        repaid_bnpl(1, NOW - 120 * DAY),
        active_bnpl(2, NOW - DAY),
        BnplLoan {
            status: BnplStatus::Defaulted,
            ..repaid_bnpl(3, NOW - 60 * DAY)
        },
    ];
    let nft = vec![nft_loan(4, NftStatus::Repaid), nft_loan(5, NftStatus::Active)];

    let first = compute_aura_score(&bnpl, &nft, NOW).expect("valid input");
    for _ in 0..10 {
        let next = compute_aura_score(&bnpl, &nft, NOW).expect("valid input");
        assert_eq!(first, next);
    }
}

#[test]
fn empty_history_is_the_neutral_baseline() {
    let result = compute_aura_score(&[], &[], NOW).expect("new wallet is valid");

    assert_eq!(result.score, BASE_SCORE);
    assert!(!result.metrics.has_history);
    assert_eq!(result.factors.len(), 6);
    assert!(result.factors.iter().all(|factor| factor.score == 0));
}

#[test]
fn perfect_bnpl_repayment_earns_the_top_marks() {
    // Five repaid loans, every installment paid, collateral reclaimed,
    // first loan 90 days old.
    let loans: Vec<BnplLoan> = (1..=5)
        .map(|id| repaid_bnpl(id, NOW - 90 * DAY))
        .collect();

    let result = compute_aura_score(&loans, &[], NOW).expect("valid input");

    assert_eq!(factor(&result, FactorKind::RepaymentReliability), 200);
    assert_eq!(factor(&result, FactorKind::PaymentDiscipline), 150);
    // 5 loans -> 60, plus three full months of history -> +15.
    assert_eq!(factor(&result, FactorKind::BorrowingExperience), 75);
    assert_eq!(factor(&result, FactorKind::PortfolioDiversity), 20);
    assert_eq!(factor(&result, FactorKind::CollateralBehavior), 50);
    assert_eq!(factor(&result, FactorKind::NftTrackRecord), 0);
    assert_eq!(result.score, 995);
    assert_eq!(result.tier, AuraTier::Legendary);
}

#[test]
fn single_default_costs_exactly_one_hundred_seventy_five() {
    let loan = BnplLoan {
        status: BnplStatus::Defaulted,
        installments_paid: 1,
        ..repaid_bnpl(1, NOW - DAY)
    };

    let result = compute_aura_score(&[loan], &[], NOW).expect("valid input");

    // ratio 0 -> -100 base, minus one 75-point default penalty.
    assert_eq!(factor(&result, FactorKind::RepaymentReliability), -175);
    assert_eq!(factor(&result, FactorKind::PaymentDiscipline), 0);
    assert_eq!(factor(&result, FactorKind::BorrowingExperience), 10);
    assert_eq!(factor(&result, FactorKind::PortfolioDiversity), 20);
    assert_eq!(factor(&result, FactorKind::CollateralBehavior), -25);
    assert_eq!(result.score, 330);
    assert_eq!(result.tier, AuraTier::Weak);
}

#[test]
fn diversity_bonus_depends_only_on_loan_types_present() {
    let both = compute_aura_score(
        &[active_bnpl(1, NOW + DAY)],
        &[nft_loan(2, NftStatus::Active)],
        NOW,
    )
    .expect("valid input");
    assert_eq!(factor(&both, FactorKind::PortfolioDiversity), 50);

    let bnpl_only =
        compute_aura_score(&[active_bnpl(1, NOW + DAY)], &[], NOW).expect("valid input");
    assert_eq!(factor(&bnpl_only, FactorKind::PortfolioDiversity), 20);

    let nft_only =
        compute_aura_score(&[], &[nft_loan(2, NftStatus::Active)], NOW).expect("valid input");
    assert_eq!(factor(&nft_only, FactorKind::PortfolioDiversity), 20);

    let neither = compute_aura_score(&[], &[], NOW).expect("valid input");
    assert_eq!(factor(&neither, FactorKind::PortfolioDiversity), 0);
}

#[test]
fn due_exactly_now_is_still_on_time() {
    let on_time = compute_aura_score(&[active_bnpl(1, NOW)], &[], NOW).expect("valid input");
    assert_eq!(on_time.metrics.on_time_bnpl_loans, 1);
    assert_eq!(on_time.metrics.late_bnpl_loans, 0);
    // 2/4 installments -> 50, plus the on-time boost.
    assert_eq!(factor(&on_time, FactorKind::PaymentDiscipline), 60);

    let late = compute_aura_score(&[active_bnpl(1, NOW - 1)], &[], NOW).expect("valid input");
    assert_eq!(late.metrics.late_bnpl_loans, 1);
    // 50 minus the 30-point overdue penalty.
    assert_eq!(factor(&late, FactorKind::PaymentDiscipline), 20);
}

#[test]
fn factors_and_score_stay_within_documented_bounds() {
    let histories: Vec<(Vec<BnplLoan>, Vec<NftLoan>)> = vec![
        (
            (1..=20).map(|id| repaid_bnpl(id, NOW - 400 * DAY)).collect(),
            (1..=20).map(|id| nft_loan(id, NftStatus::Repaid)).collect(),
        ),
        (
            (1..=20)
                .map(|id| BnplLoan {
                    status: BnplStatus::Defaulted,
                    ..repaid_bnpl(id, NOW - 400 * DAY)
                })
                .collect(),
            (1..=20)
                .map(|id| nft_loan(id, NftStatus::Liquidated))
                .collect(),
        ),
        (
            (1..=10).map(|id| active_bnpl(id, NOW - 90 * DAY)).collect(),
            Vec::new(),
        ),
    ];

    for (bnpl, nft) in &histories {
        let result = compute_aura_score(bnpl, nft, NOW).expect("valid input");
        assert!(result.score <= 1000);
        for factor in &result.factors {
            assert!(
                factor.score >= factor.min_score && factor.score <= factor.max_score,
                "{:?} escaped its range: {}",
                factor.kind,
                factor.score
            );
        }
    }
}
