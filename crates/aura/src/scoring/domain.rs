use serde::{Deserialize, Serialize};

/// Identifier wrapper for borrower wallets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(pub String);

/// Raised when an on-chain status code has no known mapping.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} loan status code {raw}")]
pub struct UnknownStatusCode {
    pub kind: &'static str,
    pub raw: u8,
}

/// Lifecycle of a BNPL installment loan. `Active` is the initial state;
/// the transitions to `Repaid` and `Defaulted` are terminal and one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BnplStatus {
    Active,
    Repaid,
    Defaulted,
}

impl BnplStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BnplStatus::Active => "active",
            BnplStatus::Repaid => "repaid",
            BnplStatus::Defaulted => "defaulted",
        }
    }

    /// Maps the raw on-chain status code. Integer codes never travel past
    /// this boundary; everything downstream works with the closed enum.
    pub fn from_raw(raw: u8) -> Result<Self, UnknownStatusCode> {
        match raw {
            0 => Ok(BnplStatus::Active),
            1 => Ok(BnplStatus::Repaid),
            2 => Ok(BnplStatus::Defaulted),
            other => Err(UnknownStatusCode {
                kind: "bnpl",
                raw: other,
            }),
        }
    }
}

/// Lifecycle of an NFT-collateralized loan. `Defaulted` and `Liquidated`
/// both count as "closed, not repaid" for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NftStatus {
    Active,
    Repaid,
    Defaulted,
    Liquidated,
}

impl NftStatus {
    pub const fn label(self) -> &'static str {
        match self {
            NftStatus::Active => "active",
            NftStatus::Repaid => "repaid",
            NftStatus::Defaulted => "defaulted",
            NftStatus::Liquidated => "liquidated",
        }
    }

    pub const fn is_closed_unpaid(self) -> bool {
        matches!(self, NftStatus::Defaulted | NftStatus::Liquidated)
    }

    pub fn from_raw(raw: u8) -> Result<Self, UnknownStatusCode> {
        match raw {
            0 => Ok(NftStatus::Active),
            1 => Ok(NftStatus::Repaid),
            2 => Ok(NftStatus::Defaulted),
            3 => Ok(NftStatus::Liquidated),
            other => Err(UnknownStatusCode {
                kind: "nft",
                raw: other,
            }),
        }
    }
}

/// One BNPL purchase loan. Monetary amounts are in the smallest integer
/// unit (wei-equivalent); timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BnplLoan {
    pub id: u64,
    pub status: BnplStatus,
    /// Paid installments out of the protocol-fixed four.
    pub installments_paid: u8,
    pub product_price: u128,
    /// Meaningful only while the loan is active.
    pub next_due_timestamp: i64,
    /// True until the borrower reclaims collateral after repayment, or
    /// until liquidation on default.
    pub collateral_locked: bool,
    pub created_at: i64,
}

/// One NFT-collateralized loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftLoan {
    pub id: u64,
    pub status: NftStatus,
    pub loan_amount: u128,
    pub interest_amount: u128,
    pub total_repaid: u128,
    pub due_timestamp: i64,
    pub created_at: i64,
}

impl NftLoan {
    pub fn total_due(&self) -> u128 {
        self.loan_amount + self.interest_amount
    }
}
