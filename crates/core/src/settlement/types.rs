//! Settlement plan types.

use divvy_shared::types::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A proposed (not yet recorded) payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    /// The paying member (a debtor).
    pub from: MemberId,
    /// The receiving member (a creditor).
    pub to: MemberId,
    /// Amount to pay (always positive).
    pub amount: Decimal,
}

/// The "settle everything" plan for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Payments that zero out every balance.
    pub transactions: Vec<SettlementTransaction>,
    /// Sum of all payment amounts.
    pub total_amount: Decimal,
    /// Number of members the plan was computed over.
    pub member_count: usize,
    /// Upper bound on the number of payments (`member_count - 1`).
    pub max_transactions: usize,
}

impl SettlementPlan {
    /// Returns the number of payments in the plan.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the group is already settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.transactions.is_empty()
    }
}
