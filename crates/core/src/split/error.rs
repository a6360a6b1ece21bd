//! Split error types.

use divvy_shared::AppError;
use divvy_shared::types::{ExpenseId, MemberId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building or checking expense splits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    // ========== Total Errors ==========
    /// Total to split is zero or negative.
    #[error("Amount to split must be positive, got {0}")]
    NonPositiveTotal(Decimal),

    // ========== Member Errors ==========
    /// No members to split between.
    #[error("At least one member is required to split an expense")]
    NoMembers,

    /// A member appears more than once.
    #[error("Member {0} appears more than once in the split")]
    DuplicateMember(MemberId),

    /// Members and values have different lengths.
    #[error("Got {members} members but {values} values")]
    LengthMismatch {
        /// Number of members.
        members: usize,
        /// Number of amounts or percentages.
        values: usize,
    },

    // ========== Value Errors ==========
    /// A split amount is negative.
    #[error("Split amount for member {member_id} cannot be negative, got {amount}")]
    NegativeAmount {
        /// The member on the split.
        member_id: MemberId,
        /// The amount found.
        amount: Decimal,
    },

    /// A percentage is negative.
    #[error("Percentage for member {member_id} cannot be negative, got {percentage}")]
    NegativePercentage {
        /// The member on the split.
        member_id: MemberId,
        /// The percentage found.
        percentage: Decimal,
    },

    /// Percentages do not add up to 100.
    #[error("Percentages must sum to 100, got {0}")]
    PercentageSumMismatch(Decimal),

    /// Split amounts do not add up to the total.
    #[error("Split amounts sum to {actual}, expected {expected}")]
    AmountSumMismatch {
        /// The total being split.
        expected: Decimal,
        /// Sum of the split amounts.
        actual: Decimal,
    },

    /// Total has more decimal places than the allocation scale.
    #[error("Amount {total} cannot be split at {scale} decimal places without losing value")]
    TotalExceedsScale {
        /// The total being split.
        total: Decimal,
        /// Decimal places allowed.
        scale: u32,
    },

    // ========== Expense Errors ==========
    /// An expense carries no splits.
    #[error("Expense {0} has no splits")]
    NoSplits(ExpenseId),
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveTotal(_) => "NON_POSITIVE_TOTAL",
            Self::NoMembers => "NO_MEMBERS",
            Self::DuplicateMember(_) => "DUPLICATE_MEMBER",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::NegativePercentage { .. } => "NEGATIVE_PERCENTAGE",
            Self::PercentageSumMismatch(_) => "PERCENTAGE_SUM_MISMATCH",
            Self::AmountSumMismatch { .. } => "AMOUNT_SUM_MISMATCH",
            Self::TotalExceedsScale { .. } => "TOTAL_EXCEEDS_SCALE",
            Self::NoSplits(_) => "NO_SPLITS",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Every split error is a malformed request.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        Self::Validation(err.to_string())
    }
}
