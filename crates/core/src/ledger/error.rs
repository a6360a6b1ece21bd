//! Ledger error types.
//!
//! The builder assumes pre-validated input, but when a snapshot breaks
//! referential integrity or carries impossible amounts it fails fast with
//! one of these instead of producing an inconsistent ledger.

use divvy_shared::AppError;
use divvy_shared::types::{ExpenseId, MemberId, SettlementId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building or reading a debt ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Referential Errors ==========
    /// A record references a member outside the group.
    #[error("Member {0} is not part of this group")]
    UnknownMember(MemberId),

    // ========== Amount Errors ==========
    /// Expense amount is zero or negative.
    #[error("Expense {expense_id} has non-positive amount {amount}")]
    NonPositiveExpenseAmount {
        /// The offending expense.
        expense_id: ExpenseId,
        /// The amount found.
        amount: Decimal,
    },

    /// A split carries a negative amount.
    #[error("Expense {expense_id} has a negative split of {amount} for member {member_id}")]
    NegativeSplitAmount {
        /// The expense the split belongs to.
        expense_id: ExpenseId,
        /// The member on the split.
        member_id: MemberId,
        /// The amount found.
        amount: Decimal,
    },

    /// Settlement amount is zero or negative.
    #[error("Settlement {settlement_id} has non-positive amount {amount}")]
    NonPositiveSettlementAmount {
        /// The offending settlement.
        settlement_id: SettlementId,
        /// The amount found.
        amount: Decimal,
    },

    /// A running balance no longer fits in a `Decimal`.
    #[error("Balance for member {0} is too large to represent")]
    AmountOverflow(MemberId),

    // ========== Shape Errors ==========
    /// A settlement pays the same member it comes from.
    #[error("Settlement {0} pays a member to themselves")]
    SelfSettlement(SettlementId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::NonPositiveExpenseAmount { .. } => "NON_POSITIVE_EXPENSE_AMOUNT",
            Self::NegativeSplitAmount { .. } => "NEGATIVE_SPLIT_AMOUNT",
            Self::NonPositiveSettlementAmount { .. } => "NON_POSITIVE_SETTLEMENT_AMOUNT",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::SelfSettlement(_) => "SELF_SETTLEMENT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 404 Not Found
            Self::UnknownMember(_) => 404,

            // 400 Bad Request - malformed records
            Self::NonPositiveExpenseAmount { .. }
            | Self::NegativeSplitAmount { .. }
            | Self::NonPositiveSettlementAmount { .. }
            | Self::AmountOverflow(_)
            | Self::SelfSettlement(_) => 400,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownMember(_) => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
