//! Pairwise debt ledger.
//!
//! This module implements the core ledger functionality:
//! - Input records (expenses, splits, settlements)
//! - The skew-symmetric debt matrix and its builder
//! - Per-member net balances and per-pair pending balances
//! - Error types for malformed input

pub mod balance;
pub mod builder;
pub mod error;
pub mod matrix;
pub mod types;

#[cfg(test)]
mod builder_props;

pub use balance::{
    BalanceDirection, NetBalance, PairwiseBalance, aggregate, conservation_residual,
    pending_balances,
};
pub use builder::build_ledger;
pub use error::LedgerError;
pub use matrix::{Debt, DebtLedger};
pub use types::{Expense, ExpenseSplit, Settlement, SettlementStatus};
