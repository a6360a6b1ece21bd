//! Building and checking expense splits.

use std::collections::HashSet;

use divvy_shared::types::{MemberId, Tolerance};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::allocation::{allocate_by_percentages, allocate_equal};
use super::error::SplitError;
use crate::ledger::{Expense, ExpenseSplit};

/// How an expense total is divided between members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Everyone pays the same share.
    Equal {
        /// Members sharing the expense.
        members: Vec<MemberId>,
    },
    /// Each member pays a percentage of the total.
    Percentages {
        /// Members sharing the expense.
        members: Vec<MemberId>,
        /// One percentage per member, summing to 100.
        percentages: Vec<Decimal>,
    },
    /// Each member pays a fixed amount.
    Exact {
        /// Members sharing the expense.
        members: Vec<MemberId>,
        /// One amount per member, summing to the total.
        amounts: Vec<Decimal>,
    },
}

impl SplitStrategy {
    fn members(&self) -> &[MemberId] {
        match self {
            Self::Equal { members }
            | Self::Percentages { members, .. }
            | Self::Exact { members, .. } => members,
        }
    }
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Divides `total` between members according to `strategy`.
///
/// Amounts are allocated at `scale` decimal places and always add up to
/// `total` exactly. Every split records its percentage of the total.
///
/// # Errors
///
/// Returns a [`SplitError`] for a non-positive total, a total with more
/// decimal places than `scale`, an empty or duplicated member list, mismatched value counts, negative values, percentages that do
/// not sum to 100, or exact amounts that do not sum to the total.
pub fn build_splits(
    total: Decimal,
    strategy: &SplitStrategy,
    scale: u32,
) -> Result<Vec<ExpenseSplit>, SplitError> {
    if total <= Decimal::ZERO {
        return Err(SplitError::NonPositiveTotal(total));
    }
    if total.round_dp_with_strategy(scale, RoundingStrategy::ToZero) != total {
        return Err(SplitError::TotalExceedsScale { total, scale });
    }
    let members = strategy.members();
    check_members(members)?;

    let splits = match strategy {
        SplitStrategy::Equal { members } => {
            let amounts = allocate_equal(total, members.len(), scale);
            with_derived_percentages(members, &amounts, total)
        }
        SplitStrategy::Percentages {
            members,
            percentages,
        } => {
            check_lengths(members, percentages)?;
            for (member_id, percentage) in members.iter().zip(percentages) {
                if *percentage < Decimal::ZERO {
                    return Err(SplitError::NegativePercentage {
                        member_id: *member_id,
                        percentage: *percentage,
                    });
                }
            }
            let sum: Decimal = percentages.iter().copied().sum();
            if !Tolerance::default().approx_eq(sum, HUNDRED) {
                return Err(SplitError::PercentageSumMismatch(sum));
            }

            let amounts = allocate_by_percentages(total, percentages, scale);
            members
                .iter()
                .zip(amounts)
                .zip(percentages)
                .map(|((member_id, amount), percentage)| ExpenseSplit {
                    owed_by: *member_id,
                    amount,
                    percentage: Some(*percentage),
                })
                .collect()
        }
        SplitStrategy::Exact { members, amounts } => {
            check_lengths(members, amounts)?;
            for (member_id, amount) in members.iter().zip(amounts) {
                if *amount < Decimal::ZERO {
                    return Err(SplitError::NegativeAmount {
                        member_id: *member_id,
                        amount: *amount,
                    });
                }
            }
            let actual: Decimal = amounts.iter().copied().sum();
            if actual != total {
                return Err(SplitError::AmountSumMismatch {
                    expected: total,
                    actual,
                });
            }
            with_derived_percentages(members, amounts, total)
        }
    };

    debug!(%total, members = members.len(), "Built expense splits");
    Ok(splits)
}

fn check_members(members: &[MemberId]) -> Result<(), SplitError> {
    if members.is_empty() {
        return Err(SplitError::NoMembers);
    }
    let mut seen = HashSet::with_capacity(members.len());
    for member_id in members {
        if !seen.insert(member_id) {
            return Err(SplitError::DuplicateMember(*member_id));
        }
    }
    Ok(())
}

fn check_lengths(members: &[MemberId], values: &[Decimal]) -> Result<(), SplitError> {
    if members.len() == values.len() {
        Ok(())
    } else {
        Err(SplitError::LengthMismatch {
            members: members.len(),
            values: values.len(),
        })
    }
}

/// Records each split's share of the total, allocated so the percentages add
/// up to exactly 100.
fn with_derived_percentages(members: &[MemberId], amounts: &[Decimal], total: Decimal) -> Vec<ExpenseSplit> {
    debug_assert_eq!(amounts.iter().copied().sum::<Decimal>(), total);
    let percentages = allocate_by_percentages(HUNDRED, amounts, 2);
    members
        .iter()
        .zip(amounts)
        .zip(percentages)
        .map(|((member_id, amount), percentage)| ExpenseSplit {
            owed_by: *member_id,
            amount: *amount,
            percentage: Some(percentage),
        })
        .collect()
}

/// Checks that an externally supplied expense is internally consistent.
///
/// # Errors
///
/// Returns a [`SplitError`] if the amount is not positive, there are no
/// splits, a member is split twice, a split is negative, the splits miss the
/// amount by more than `tolerance`, or every split carries a percentage and
/// those miss 100 by more than `tolerance`.
pub fn validate_expense(expense: &Expense, tolerance: Tolerance) -> Result<(), SplitError> {
    if expense.amount <= Decimal::ZERO {
        return Err(SplitError::NonPositiveTotal(expense.amount));
    }
    if expense.splits.is_empty() {
        return Err(SplitError::NoSplits(expense.id));
    }

    let mut seen = HashSet::with_capacity(expense.splits.len());
    for split in &expense.splits {
        if !seen.insert(split.owed_by) {
            return Err(SplitError::DuplicateMember(split.owed_by));
        }
        if split.amount < Decimal::ZERO {
            return Err(SplitError::NegativeAmount {
                member_id: split.owed_by,
                amount: split.amount,
            });
        }
    }

    let actual: Decimal = expense.splits.iter().map(|s| s.amount).sum();
    if !tolerance.approx_eq(actual, expense.amount) {
        return Err(SplitError::AmountSumMismatch {
            expected: expense.amount,
            actual,
        });
    }

    let percentages: Option<Vec<Decimal>> = expense.splits.iter().map(|s| s.percentage).collect();
    if let Some(percentages) = percentages {
        let sum: Decimal = percentages.into_iter().sum();
        if !tolerance.approx_eq(sum, HUNDRED) {
            return Err(SplitError::PercentageSumMismatch(sum));
        }
    }

    Ok(())
}
