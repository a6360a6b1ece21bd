//! Group-level facade over the ledger and settlement modules.

pub mod engine;
pub mod snapshot;

pub use engine::SettlementEngine;
pub use snapshot::{GroupSnapshot, GroupSummary};
