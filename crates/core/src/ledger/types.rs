//! Ledger input records.
//!
//! These are the typed snapshots an outer layer fetches for a group and
//! hands to the ledger builder. The engine never mutates them.

use chrono::{DateTime, Utc};
use divvy_shared::types::{ExpenseId, MemberId, SettlementId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The portion of one expense attributed to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// The member who owes this share.
    pub owed_by: MemberId,
    /// The share amount (must not be negative).
    pub amount: Decimal,
    /// The share as a percentage of the expense, when recorded.
    #[serde(default)]
    pub percentage: Option<Decimal>,
}

impl ExpenseSplit {
    /// Creates a split without a recorded percentage.
    #[must_use]
    pub const fn new(owed_by: MemberId, amount: Decimal) -> Self {
        Self {
            owed_by,
            amount,
            percentage: None,
        }
    }
}

/// An expense paid by one member and shared across splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The expense ID.
    pub id: ExpenseId,
    /// The member who paid.
    pub paid_by: MemberId,
    /// Total amount paid (must be positive).
    pub amount: Decimal,
    /// Shares of the total; amounts sum to `amount` within tolerance.
    pub splits: Vec<ExpenseSplit>,
}

/// Settlement status.
///
/// Only completed settlements move money in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Requested but not yet paid.
    Pending,
    /// Paid.
    Completed,
    /// Withdrawn.
    Cancelled,
}

impl SettlementStatus {
    /// Returns true if a settlement in this status is applied to the ledger.
    #[must_use]
    pub fn affects_ledger(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A recorded payment from one member to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The settlement ID.
    pub id: SettlementId,
    /// The paying member.
    pub from: MemberId,
    /// The receiving member.
    pub to: MemberId,
    /// Amount paid (must be positive).
    pub amount: Decimal,
    /// Current status.
    pub status: SettlementStatus,
    /// When the payment completed, if it has.
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

impl Settlement {
    /// Creates a completed settlement stamped with the current time.
    #[must_use]
    pub fn completed(from: MemberId, to: MemberId, amount: Decimal) -> Self {
        Self {
            id: SettlementId::new(),
            from,
            to,
            amount,
            status: SettlementStatus::Completed,
            settled_at: Some(Utc::now()),
        }
    }
}
