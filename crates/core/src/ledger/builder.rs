//! Ledger construction from a group's expense and settlement history.

use divvy_shared::types::MemberId;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::error::LedgerError;
use super::matrix::DebtLedger;
use super::types::{Expense, Settlement};

/// Builds the pairwise debt ledger for a group snapshot.
///
/// Rules:
/// 1. Every ordered pair of distinct members starts at zero.
/// 2. Each split owed by someone other than the payer adds its amount to
///    what that member owes the payer.
/// 3. Each completed settlement `from -> to` reduces what `from` owes `to`
///    by its amount. Pending and cancelled settlements are skipped.
///
/// Input order does not matter. The ledger is recomputed from scratch on
/// every call; nothing is cached between snapshots.
///
/// # Errors
///
/// Fails fast on the first record that references a member outside
/// `members`, carries a non-positive expense or settlement amount, a
/// negative split, pays a member to themselves, or pushes a balance past
/// what `Decimal` can hold.
pub fn build_ledger(
    members: &[MemberId],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Result<DebtLedger, LedgerError> {
    let mut ledger = DebtLedger::zeroed(members.iter().copied());

    for expense in expenses {
        apply_expense(&mut ledger, expense)?;
    }

    let mut applied = 0usize;
    for settlement in settlements {
        if !settlement.status.affects_ledger() {
            trace!(
                settlement_id = %settlement.id,
                status = ?settlement.status,
                "Skipping settlement that has not completed"
            );
            continue;
        }
        apply_settlement(&mut ledger, settlement)?;
        applied += 1;
    }

    debug_assert!(ledger.is_skew_symmetric(), "ledger lost skew-symmetry");
    debug!(
        members = ledger.len(),
        expenses = expenses.len(),
        settlements = applied,
        "Built debt ledger"
    );

    Ok(ledger)
}

fn apply_expense(ledger: &mut DebtLedger, expense: &Expense) -> Result<(), LedgerError> {
    if expense.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveExpenseAmount {
            expense_id: expense.id,
            amount: expense.amount,
        });
    }

    let payer = ledger.index_of(expense.paid_by)?;

    for split in &expense.splits {
        if split.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeSplitAmount {
                expense_id: expense.id,
                member_id: split.owed_by,
                amount: split.amount,
            });
        }

        let debtor = ledger.index_of(split.owed_by)?;
        // The payer's own share never creates a debt.
        if debtor != payer {
            ledger.record(debtor, payer, split.amount)?;
        }
    }

    Ok(())
}

fn apply_settlement(ledger: &mut DebtLedger, settlement: &Settlement) -> Result<(), LedgerError> {
    if settlement.from == settlement.to {
        return Err(LedgerError::SelfSettlement(settlement.id));
    }
    if settlement.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveSettlementAmount {
            settlement_id: settlement.id,
            amount: settlement.amount,
        });
    }

    let from = ledger.index_of(settlement.from)?;
    let to = ledger.index_of(settlement.to)?;

    // `from` paid `to`: equivalent to `to` owing `from` that much more.
    ledger.record(to, from, settlement.amount)
}
