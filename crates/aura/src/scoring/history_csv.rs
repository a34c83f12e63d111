//! Offline loan-history ingestion from CSV exports.
//!
//! One file carries both ledgers: each row is tagged `bnpl` or `nft`, and
//! statuses are accepted either as labels (`repaid`) or as the raw on-chain
//! codes (`1`). Malformed rows fail the whole import with a descriptive
//! error rather than being coerced or skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::collector::LoanHistory;
use super::domain::{BnplLoan, BnplStatus, NftLoan, NftStatus};

#[derive(Debug, thiserror::Error)]
pub enum HistoryCsvError {
    #[error("failed to read history export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid history CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown loan kind '{kind}'")]
    UnknownKind { row: usize, kind: String },
    #[error("row {row}: unknown {kind} status '{status}'")]
    UnknownStatus {
        row: usize,
        kind: &'static str,
        status: String,
    },
    #[error("row {row}: missing required column '{column}' for {kind} loans")]
    MissingColumn {
        row: usize,
        kind: &'static str,
        column: &'static str,
    },
}

pub fn from_path(path: &Path) -> Result<LoanHistory, HistoryCsvError> {
    let file = File::open(path)?;
    from_reader(file)
}

pub fn from_reader<R: Read>(reader: R) -> Result<LoanHistory, HistoryCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut history = LoanHistory::default();
    for (index, record) in csv_reader.deserialize::<HistoryRow>().enumerate() {
        let row = record?;
        // The header occupies the first line of the file.
        let line = index + 2;
        match row.kind.to_ascii_lowercase().as_str() {
            "bnpl" => history.bnpl.push(row.into_bnpl(line)?),
            "nft" => history.nft.push(row.into_nft(line)?),
            other => {
                return Err(HistoryCsvError::UnknownKind {
                    row: line,
                    kind: other.to_string(),
                })
            }
        }
    }

    Ok(history)
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    kind: String,
    id: u64,
    status: String,
    #[serde(default)]
    installments_paid: Option<u8>,
    #[serde(default)]
    product_price: Option<u128>,
    #[serde(default)]
    loan_amount: Option<u128>,
    #[serde(default)]
    interest_amount: Option<u128>,
    #[serde(default)]
    total_repaid: Option<u128>,
    #[serde(default)]
    next_due_timestamp: Option<i64>,
    #[serde(default)]
    due_timestamp: Option<i64>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    collateral_locked: Option<bool>,
}

impl HistoryRow {
    fn into_bnpl(self, row: usize) -> Result<BnplLoan, HistoryCsvError> {
        let status = parse_bnpl_status(&self.status).ok_or_else(|| HistoryCsvError::UnknownStatus {
            row,
            kind: "bnpl",
            status: self.status.clone(),
        })?;

        Ok(BnplLoan {
            id: self.id,
            status,
            installments_paid: self
                .installments_paid
                .ok_or(missing(row, "bnpl", "installments_paid"))?,
            product_price: self
                .product_price
                .ok_or(missing(row, "bnpl", "product_price"))?,
            next_due_timestamp: self.next_due_timestamp.unwrap_or(0),
            collateral_locked: self.collateral_locked.unwrap_or(false),
            created_at: self.created_at.ok_or(missing(row, "bnpl", "created_at"))?,
        })
    }

    fn into_nft(self, row: usize) -> Result<NftLoan, HistoryCsvError> {
        let status = parse_nft_status(&self.status).ok_or_else(|| HistoryCsvError::UnknownStatus {
            row,
            kind: "nft",
            status: self.status.clone(),
        })?;

        Ok(NftLoan {
            id: self.id,
            status,
            loan_amount: self.loan_amount.ok_or(missing(row, "nft", "loan_amount"))?,
            interest_amount: self
                .interest_amount
                .ok_or(missing(row, "nft", "interest_amount"))?,
            total_repaid: self.total_repaid.unwrap_or(0),
            due_timestamp: self
                .due_timestamp
                .ok_or(missing(row, "nft", "due_timestamp"))?,
            created_at: self.created_at.ok_or(missing(row, "nft", "created_at"))?,
        })
    }
}

fn missing(row: usize, kind: &'static str, column: &'static str) -> HistoryCsvError {
    HistoryCsvError::MissingColumn { row, kind, column }
}

fn parse_bnpl_status(value: &str) -> Option<BnplStatus> {
    match value.to_ascii_lowercase().as_str() {
        "active" => Some(BnplStatus::Active),
        "repaid" => Some(BnplStatus::Repaid),
        "defaulted" => Some(BnplStatus::Defaulted),
        raw => raw
            .parse::<u8>()
            .ok()
            .and_then(|code| BnplStatus::from_raw(code).ok()),
    }
}

fn parse_nft_status(value: &str) -> Option<NftStatus> {
    match value.to_ascii_lowercase().as_str() {
        "active" => Some(NftStatus::Active),
        "repaid" => Some(NftStatus::Repaid),
        "defaulted" => Some(NftStatus::Defaulted),
        "liquidated" => Some(NftStatus::Liquidated),
        raw => raw
            .parse::<u8>()
            .ok()
            .and_then(|code| NftStatus::from_raw(code).ok()),
    }
}
