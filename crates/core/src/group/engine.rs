//! Settlement engine facade.
//!
//! Bundles the configured tolerance and split scale with the ledger,
//! balance, settlement and split operations so callers deal with one type.

use divvy_shared::AppResult;
use divvy_shared::config::EngineConfig;
use divvy_shared::types::{MemberId, Tolerance, amount::DEFAULT_SCALE};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::snapshot::{GroupSnapshot, GroupSummary};
use crate::ledger::{self, DebtLedger, ExpenseSplit, LedgerError, NetBalance, PairwiseBalance};
use crate::settlement::{self, SettlementPlan, SettlementRejection};
use crate::split::{self, SplitError, SplitStrategy};

/// Runs ledger and settlement computations for group snapshots.
///
/// Stateless apart from its settings; every call rebuilds from the snapshot
/// it is given.
#[derive(Debug, Clone, Copy)]
pub struct SettlementEngine {
    tolerance: Tolerance,
    scale: u32,
}

impl SettlementEngine {
    /// Creates an engine with the given tolerance and the default split scale.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            scale: DEFAULT_SCALE,
        }
    }

    /// Creates an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured tolerance is not positive.
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        Ok(Self::new(config.tolerance()?).with_scale(config.scale))
    }

    /// Sets the decimal places used when allocating splits.
    #[must_use]
    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the tolerance in use.
    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Builds the debt ledger for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the snapshot is inconsistent.
    pub fn ledger(&self, snapshot: &GroupSnapshot) -> Result<DebtLedger, LedgerError> {
        ledger::build_ledger(&snapshot.members, &snapshot.expenses, &snapshot.settlements)
    }

    /// Net balance for every member, in snapshot order.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the snapshot is inconsistent.
    pub fn balances(&self, snapshot: &GroupSnapshot) -> Result<Vec<NetBalance>, LedgerError> {
        let ledger = self.ledger(snapshot)?;
        ledger::aggregate(&ledger, &snapshot.members)
    }

    /// The "settle everything" plan for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the snapshot is inconsistent.
    pub fn plan(&self, snapshot: &GroupSnapshot) -> Result<SettlementPlan, LedgerError> {
        let balances = self.balances(snapshot)?;
        Ok(settlement::plan(&balances, self.tolerance))
    }

    /// A viewer's unsettled balances with each other member.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the snapshot is inconsistent or the
    /// viewer is not a member.
    pub fn pending_balances(
        &self,
        snapshot: &GroupSnapshot,
        viewer: MemberId,
    ) -> Result<Vec<PairwiseBalance>, LedgerError> {
        let ledger = self.ledger(snapshot)?;
        ledger::pending_balances(&ledger, viewer, self.tolerance)
    }

    /// Checks a proposed payment against what the payer owes the payee.
    ///
    /// # Errors
    ///
    /// Returns the [`SettlementRejection`] explaining why the payment may not
    /// be recorded.
    pub fn validate_payment(
        &self,
        ledger: &DebtLedger,
        from: MemberId,
        to: MemberId,
        amount: Decimal,
    ) -> Result<(), SettlementRejection> {
        settlement::validate_settlement(ledger, from, to, amount, self.tolerance).inspect_err(
            |rejection| {
                warn!(
                    %from,
                    %to,
                    %amount,
                    code = rejection.code(),
                    "Rejected settlement payment"
                );
            },
        )
    }

    /// Checks a free-form payment between two members.
    ///
    /// # Errors
    ///
    /// Returns `SelfPayment` or `NonPositiveAmount`.
    pub fn validate_custom_payment(
        &self,
        from: MemberId,
        to: MemberId,
        amount: Decimal,
    ) -> Result<(), SettlementRejection> {
        settlement::validate_custom_payment(from, to, amount).inspect_err(|rejection| {
            warn!(%from, %to, %amount, code = rejection.code(), "Rejected custom payment");
        })
    }

    /// Divides an expense total using the engine's split scale.
    ///
    /// # Errors
    ///
    /// Returns a [`SplitError`] if the strategy cannot be applied.
    pub fn build_splits(
        &self,
        total: Decimal,
        strategy: &SplitStrategy,
    ) -> Result<Vec<ExpenseSplit>, SplitError> {
        split::build_splits(total, strategy, self.scale)
    }

    /// Builds the full report for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the snapshot is inconsistent.
    pub fn summarize(&self, snapshot: &GroupSnapshot) -> Result<GroupSummary, LedgerError> {
        let ledger = self.ledger(snapshot)?;
        let balances = ledger::aggregate(&ledger, &snapshot.members)?;
        let plan = settlement::plan(&balances, self.tolerance);

        info!(
            group_id = %snapshot.group_id,
            members = snapshot.members.len(),
            transactions = plan.transaction_count(),
            "Summarized group"
        );

        Ok(GroupSummary {
            group_id: snapshot.group_id,
            expense_count: snapshot.expenses.len(),
            total_expenses: snapshot.total_expenses(),
            debts: ledger.debts(),
            balances,
            plan,
        })
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}
