//! Group snapshot and summary report types.

use divvy_shared::types::{GroupId, MemberId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Debt, Expense, NetBalance, Settlement};
use crate::settlement::SettlementPlan;

/// Everything known about a group at one point in time.
///
/// Expenses and settlements must be fetched together so the ledger built
/// from them is consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// The group.
    pub group_id: GroupId,
    /// Current members.
    pub members: Vec<MemberId>,
    /// Every recorded expense.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Every recorded settlement, in any status.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl GroupSnapshot {
    /// Sum of all expense amounts, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn total_expenses(&self) -> Decimal {
        self.expenses
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.amount))
    }
}

/// Where a group stands: who owes whom and how to settle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// The group.
    pub group_id: GroupId,
    /// Number of recorded expenses.
    pub expense_count: usize,
    /// Sum of all expense amounts.
    pub total_expenses: Decimal,
    /// Outstanding pairwise debts.
    pub debts: Vec<Debt>,
    /// Net balance per member, in snapshot member order.
    pub balances: Vec<NetBalance>,
    /// Payments that would settle the group.
    pub plan: SettlementPlan,
}
