//! Payment validation against the current ledger.

use divvy_shared::types::{MemberId, Tolerance};
use rust_decimal::Decimal;

use super::error::SettlementRejection;
use crate::ledger::DebtLedger;

/// Checks a proposed payment `from -> to` against what `from` currently owes.
///
/// Checks run in order: self-payment, non-positive amount, membership,
/// direction, overpayment. A payment up to `tolerance` above the outstanding
/// debt is accepted so rounding residue can be cleared in one go.
///
/// # Errors
///
/// Returns the first [`SettlementRejection`] that applies.
pub fn validate_settlement(
    ledger: &DebtLedger,
    from: MemberId,
    to: MemberId,
    amount: Decimal,
    tolerance: Tolerance,
) -> Result<(), SettlementRejection> {
    validate_custom_payment(from, to, amount)?;

    for member in [from, to] {
        if !ledger.contains(member) {
            return Err(SettlementRejection::UnknownMember(member));
        }
    }

    let outstanding = ledger
        .owed(from, to)
        .map_err(|_| SettlementRejection::UnknownMember(from))?;

    if outstanding < Decimal::ZERO {
        return Err(SettlementRejection::WrongDirection {
            owed_to_payer: -outstanding,
        });
    }

    if amount > outstanding + tolerance.value() {
        return Err(SettlementRejection::Overpayment {
            amount,
            outstanding,
        });
    }

    Ok(())
}

/// Checks a free-form payment that is not tied to an outstanding debt.
///
/// # Errors
///
/// Returns `SelfPayment` or `NonPositiveAmount`.
pub fn validate_custom_payment(
    from: MemberId,
    to: MemberId,
    amount: Decimal,
) -> Result<(), SettlementRejection> {
    if from == to {
        return Err(SettlementRejection::SelfPayment);
    }
    if amount <= Decimal::ZERO {
        return Err(SettlementRejection::NonPositiveAmount(amount));
    }
    Ok(())
}
