//! Greedy settlement optimizer.
//!
//! Matches the largest creditor with the largest debtor, emits a transfer of
//! the smaller of the two remainders, and moves on. The result settles every
//! balance in at most `members - 1` payments. It is not guaranteed to be the
//! global minimum.

use std::cmp::Reverse;

use divvy_shared::types::{MemberId, Tolerance};
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{SettlementPlan, SettlementTransaction};
use crate::ledger::NetBalance;

/// A member with an outstanding position and what is left of it.
#[derive(Debug, Clone, Copy)]
struct Position {
    member_id: MemberId,
    remaining: Decimal,
}

/// Splits balances into creditors and debtors, largest first.
///
/// Both lists hold remainders greater than the tolerance; everything else is
/// dropped.
fn partition(balances: &[NetBalance], tolerance: Tolerance) -> (Vec<Position>, Vec<Position>) {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();

    for balance in balances {
        if tolerance.is_significant_credit(balance.net_balance) {
            creditors.push(Position {
                member_id: balance.member_id,
                remaining: balance.net_balance,
            });
        } else if tolerance.is_significant_debt(balance.net_balance) {
            debtors.push(Position {
                member_id: balance.member_id,
                remaining: -balance.net_balance,
            });
        }
    }

    creditors.sort_by_key(|p| (Reverse(p.remaining), p.member_id));
    debtors.sort_by_key(|p| (Reverse(p.remaining), p.member_id));

    (creditors, debtors)
}

/// Computes a small set of payments that brings every net balance to zero.
///
/// Pure and deterministic: the same balances always produce the same
/// transactions, in the same order.
#[must_use]
pub fn optimize(balances: &[NetBalance], tolerance: Tolerance) -> Vec<SettlementTransaction> {
    let (mut creditors, mut debtors) = partition(balances, tolerance);
    let mut transactions = Vec::with_capacity(creditors.len() + debtors.len());

    let (mut ci, mut di) = (0usize, 0usize);
    while ci < creditors.len() && di < debtors.len() {
        let creditor = &mut creditors[ci];
        let debtor = &mut debtors[di];
        let transfer = creditor.remaining.min(debtor.remaining);

        if tolerance.exceeds(transfer) {
            transactions.push(SettlementTransaction {
                from: debtor.member_id,
                to: creditor.member_id,
                amount: transfer,
            });
            creditor.remaining -= transfer;
            debtor.remaining -= transfer;
        }

        // A remainder of at most the tolerance is dust. Only the side that
        // ran out moves on, so the other side is never stranded.
        if !tolerance.exceeds(creditor.remaining) {
            ci += 1;
        }
        if !tolerance.exceeds(debtor.remaining) {
            di += 1;
        }
    }

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        transactions = transactions.len(),
        "Optimized settlement plan"
    );

    transactions
}

/// Computes the "settle everything" plan for a group.
#[must_use]
pub fn plan(balances: &[NetBalance], tolerance: Tolerance) -> SettlementPlan {
    let transactions = optimize(balances, tolerance);
    let total_amount = transactions.iter().map(|t| t.amount).sum();
    let member_count = balances.len();

    SettlementPlan {
        transactions,
        total_amount,
        member_count,
        max_transactions: member_count.saturating_sub(1),
    }
}
