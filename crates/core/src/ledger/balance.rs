//! Member balance calculations over a debt ledger.
//!
//! One formula is used throughout: for member `M` with ledger row
//! `owed(M, X)`,
//! - `gross_owing = Σ max(owed(M, X), 0)`  (what M owes others)
//! - `gross_owed  = Σ max(-owed(M, X), 0)` (what others owe M, read through
//!   skew-symmetry instead of scanning their rows)
//! - `net_balance = gross_owed - gross_owing`
//!
//! Across a whole group the net balances sum to zero.

use std::cmp::Reverse;

use divvy_shared::types::{MemberId, Tolerance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::matrix::DebtLedger;

/// A member's overall position in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    /// The member.
    pub member_id: MemberId,
    /// Positive: the group owes this member. Negative: this member owes the group.
    pub net_balance: Decimal,
    /// Total other members owe this member.
    pub gross_owed: Decimal,
    /// Total this member owes other members.
    pub gross_owing: Decimal,
}

impl NetBalance {
    /// Creates a balance with no gross breakdown, e.g. from an external source.
    #[must_use]
    pub fn from_net(member_id: MemberId, net_balance: Decimal) -> Self {
        Self {
            member_id,
            net_balance,
            gross_owed: net_balance.max(Decimal::ZERO),
            gross_owing: (-net_balance).max(Decimal::ZERO),
        }
    }
}

/// Computes net balances for `members`, in the order given.
///
/// # Errors
///
/// Returns `LedgerError::UnknownMember` if a member is not in the ledger, or
/// `LedgerError::AmountOverflow` if a gross figure does not fit in a `Decimal`.
pub fn aggregate(ledger: &DebtLedger, members: &[MemberId]) -> Result<Vec<NetBalance>, LedgerError> {
    let balances = members
        .iter()
        .map(|&member_id| -> Result<NetBalance, LedgerError> {
            let mut gross_owed = Decimal::ZERO;
            let mut gross_owing = Decimal::ZERO;
            let overflow = || LedgerError::AmountOverflow(member_id);
            for (_, amount) in ledger.row(member_id)? {
                gross_owing = gross_owing
                    .checked_add(amount.max(Decimal::ZERO))
                    .ok_or_else(overflow)?;
                gross_owed = gross_owed
                    .checked_add((-amount).max(Decimal::ZERO))
                    .ok_or_else(overflow)?;
            }
            Ok(NetBalance {
                member_id,
                net_balance: gross_owed - gross_owing,
                gross_owed,
                gross_owing,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if covers_group(ledger, members) {
        debug_assert!(
            conservation_residual(&balances).is_zero(),
            "net balances do not sum to zero"
        );
    }

    Ok(balances)
}

fn covers_group(ledger: &DebtLedger, members: &[MemberId]) -> bool {
    let mut sorted = members.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted == ledger.members() && sorted.len() == members.len()
}

/// Sum of all net balances. Zero for a complete, consistent group.
#[must_use]
pub fn conservation_residual(balances: &[NetBalance]) -> Decimal {
    balances.iter().map(|b| b.net_balance).sum()
}

/// Which way money flows between a viewer and one counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceDirection {
    /// The counterparty owes the viewer.
    Owed,
    /// The viewer owes the counterparty.
    Owes,
}

/// Outstanding balance between a viewer and one other member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseBalance {
    /// The other member.
    pub member_id: MemberId,
    /// What the other member owes the viewer; negative when the viewer owes them.
    pub amount: Decimal,
    /// Direction of `amount`.
    pub direction: BalanceDirection,
}

/// Lists the viewer's unsettled balances with each other member.
///
/// Uses the single cell `owed(other, viewer)` per pair. Pairs within
/// tolerance of zero are settled and left out. Largest absolute amount first;
/// ties ordered by member ID.
///
/// # Errors
///
/// Returns `LedgerError::UnknownMember` if the viewer is not in the ledger.
pub fn pending_balances(
    ledger: &DebtLedger,
    viewer: MemberId,
    tolerance: Tolerance,
) -> Result<Vec<PairwiseBalance>, LedgerError> {
    // The viewer's row holds owed(viewer, other) = -owed(other, viewer).
    let mut pending: Vec<PairwiseBalance> = ledger
        .row(viewer)?
        .map(|(member_id, viewer_owes)| (member_id, -viewer_owes))
        .filter(|(_, amount)| !tolerance.is_negligible(*amount))
        .map(|(member_id, amount)| PairwiseBalance {
            member_id,
            amount,
            direction: if amount > Decimal::ZERO {
                BalanceDirection::Owed
            } else {
                BalanceDirection::Owes
            },
        })
        .collect();

    pending.sort_by_key(|p| (Reverse(p.amount.abs()), p.member_id));
    Ok(pending)
}
