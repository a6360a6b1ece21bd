//! Pairwise debt ledger.
//!
//! The ledger is a dense, skew-symmetric matrix over a sorted member index:
//! `owed(a, b)` is what `a` owes `b` net of settlements, and
//! `owed(a, b) == -owed(b, a)` for every pair. It is only ever built by
//! [`build_ledger`](super::build_ledger) and is immutable afterwards.

use divvy_shared::types::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// A positive ledger cell: `debtor` owes `creditor` `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// The member who owes.
    pub debtor: MemberId,
    /// The member who is owed.
    pub creditor: MemberId,
    /// Outstanding amount (always positive).
    pub amount: Decimal,
}

/// Skew-symmetric matrix of what each member owes each other member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtLedger {
    /// Sorted, de-duplicated member index.
    members: Vec<MemberId>,
    /// Row-major `members.len()²` cells; `cells[i * n + j]` is what `i` owes `j`.
    cells: Vec<Decimal>,
}

impl DebtLedger {
    /// Creates an all-zero ledger over the given members.
    pub(crate) fn zeroed(members: impl IntoIterator<Item = MemberId>) -> Self {
        let mut members: Vec<MemberId> = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        let n = members.len();
        Self {
            members,
            cells: vec![Decimal::ZERO; n * n],
        }
    }

    /// Members covered by this ledger, in ascending ID order.
    #[must_use]
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the ledger covers no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if `member` is part of this ledger.
    #[must_use]
    pub fn contains(&self, member: MemberId) -> bool {
        self.members.binary_search(&member).is_ok()
    }

    pub(crate) fn index_of(&self, member: MemberId) -> Result<usize, LedgerError> {
        self.members
            .binary_search(&member)
            .map_err(|_| LedgerError::UnknownMember(member))
    }

    fn cell(&self, row: usize, col: usize) -> Decimal {
        self.cells[row * self.members.len() + col]
    }

    /// What `debtor` owes `creditor`; negative when `creditor` owes `debtor`.
    ///
    /// A member never owes themselves, so `owed(a, a)` is zero.
    pub fn owed(&self, debtor: MemberId, creditor: MemberId) -> Result<Decimal, LedgerError> {
        let row = self.index_of(debtor)?;
        let col = self.index_of(creditor)?;
        Ok(self.cell(row, col))
    }

    /// `member`'s row: what they owe every other member, self excluded.
    pub fn row(
        &self,
        member: MemberId,
    ) -> Result<impl Iterator<Item = (MemberId, Decimal)> + '_, LedgerError> {
        let row = self.index_of(member)?;
        Ok(self
            .members
            .iter()
            .enumerate()
            .filter(move |(col, _)| *col != row)
            .map(move |(col, other)| (*other, self.cell(row, col))))
    }

    /// Every positive cell, in member order.
    #[must_use]
    pub fn debts(&self) -> Vec<Debt> {
        let n = self.members.len();
        let mut debts = Vec::new();
        for row in 0..n {
            for col in 0..n {
                let amount = self.cell(row, col);
                if amount > Decimal::ZERO {
                    debts.push(Debt {
                        debtor: self.members[row],
                        creditor: self.members[col],
                        amount,
                    });
                }
            }
        }
        debts
    }

    /// Checks `owed(a, b) == -owed(b, a)` for every pair and a zero diagonal.
    #[must_use]
    pub fn is_skew_symmetric(&self) -> bool {
        let n = self.members.len();
        (0..n).all(|i| {
            self.cell(i, i).is_zero() && (i + 1..n).all(|j| self.cell(i, j) == -self.cell(j, i))
        })
    }

    /// Records that `debtor` owes `creditor` `amount` more.
    ///
    /// Both cells are updated together; there is no way to touch one side only.
    /// On overflow neither cell changes.
    pub(crate) fn record(&mut self, debtor: usize, creditor: usize, amount: Decimal) -> Result<(), LedgerError> {
        let n = self.members.len();
        let overflow = || LedgerError::AmountOverflow(self.members[debtor]);
        let owed = self.cells[debtor * n + creditor]
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let mirror = self.cells[creditor * n + debtor]
            .checked_sub(amount)
            .ok_or_else(overflow)?;
        self.cells[debtor * n + creditor] = owed;
        self.cells[creditor * n + debtor] = mirror;
        Ok(())
    }
}
