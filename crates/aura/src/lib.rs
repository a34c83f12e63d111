//! Aura: deterministic reputation scoring over a wallet's BNPL and
//! NFT-collateralized loan history.
//!
//! The scoring core is a pure function from a loan-history snapshot and an
//! evaluation timestamp to a bounded score, a tier, and a per-factor audit
//! trail. Everything with side effects (ledger lookups, HTTP, CSV ingestion)
//! lives at the edges and hands the core validated records.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
