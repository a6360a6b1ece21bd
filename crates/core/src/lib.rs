//! Core settlement logic for Divvy.
//!
//! This crate contains pure computation with ZERO I/O dependencies.
//! Callers fetch a group's members, expenses and settlements and pass them
//! in explicitly; nothing is cached between calls.
//!
//! # Modules
//!
//! - `ledger` - Pairwise debt ledger and member balances
//! - `settlement` - Minimal settlement plans and payment validation
//! - `split` - Expense split allocation and checks
//! - `group` - Engine facade and group summary report

pub mod group;
pub mod ledger;
pub mod settlement;
pub mod split;

pub use group::{GroupSnapshot, GroupSummary, SettlementEngine};
