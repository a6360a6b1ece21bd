//! Settlement rejection reasons.
//!
//! A rejected payment is an expected outcome, not a failure: the caller
//! turns the reason into a user-facing message.

use divvy_shared::AppError;
use divvy_shared::types::MemberId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a proposed payment was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementRejection {
    /// Payer and payee are the same member.
    #[error("Cannot make a payment to yourself")]
    SelfPayment,

    /// Amount is zero or negative.
    #[error("Payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A party is not part of the group.
    #[error("Member {0} is not part of this group")]
    UnknownMember(MemberId),

    /// The payee owes the payer, not the other way round.
    #[error("This member owes you {owed_to_payer}, you cannot settle with them")]
    WrongDirection {
        /// What the payee currently owes the payer.
        owed_to_payer: Decimal,
    },

    /// Amount exceeds the outstanding debt.
    #[error("Payment of {amount} exceeds outstanding debt of {outstanding}")]
    Overpayment {
        /// The proposed amount.
        amount: Decimal,
        /// What the payer currently owes the payee.
        outstanding: Decimal,
    },
}

impl SettlementRejection {
    /// Returns the stable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SelfPayment => "SELF_PAYMENT",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::WrongDirection { .. } => "WRONG_DIRECTION",
            Self::Overpayment { .. } => "OVERPAYMENT",
        }
    }

    /// Returns the HTTP status code for this rejection.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnknownMember(_) => 404,
            Self::SelfPayment
            | Self::NonPositiveAmount(_)
            | Self::WrongDirection { .. }
            | Self::Overpayment { .. } => 400,
        }
    }
}

impl From<SettlementRejection> for AppError {
    fn from(rejection: SettlementRejection) -> Self {
        match rejection {
            SettlementRejection::SelfPayment | SettlementRejection::NonPositiveAmount(_) => {
                Self::Validation(rejection.to_string())
            }
            SettlementRejection::UnknownMember(_) => Self::NotFound(rejection.to_string()),
            SettlementRejection::WrongDirection { .. } | SettlementRejection::Overpayment { .. } => {
                Self::BusinessRule(rejection.to_string())
            }
        }
    }
}
