//! Settlement planning and payment validation.
//!
//! The optimizer turns net balances into a short list of payments that
//! settles the group. The validator checks a single proposed payment against
//! the ledger before a collaborator records it.

pub mod error;
pub mod optimizer;
pub mod types;
pub mod validation;

#[cfg(test)]
mod optimizer_props;

pub use error::SettlementRejection;
pub use optimizer::{optimize, plan};
pub use types::{SettlementPlan, SettlementTransaction};
pub use validation::{validate_custom_payment, validate_settlement};
