//! Property-based tests for the settlement optimizer.
//!
//! Balances are generated by building a real ledger so they always conserve,
//! then the plan is checked for total, size and that it actually settles.

use std::collections::HashMap;

use divvy_shared::types::{ExpenseId, MemberId, Tolerance};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::optimizer::optimize;
use super::validation::validate_settlement;
use crate::ledger::{Expense, ExpenseSplit, NetBalance, Settlement, aggregate, build_ledger};

fn member(index: usize) -> MemberId {
    MemberId::from_uuid(Uuid::from_u128(index as u128 + 1))
}

/// Strategy to generate a positive amount in cents (0.01 to 500.00).
fn cents() -> impl Strategy<Value = Decimal> + Clone {
    (1i64..50_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy to generate a positive whole amount (1.00 to 500.00).
///
/// Balances built from whole amounts never land within a cent of zero, so
/// the plan has no dust to drop.
fn whole_units() -> impl Strategy<Value = Decimal> + Clone {
    (1i64..500i64).prop_map(|u| Decimal::new(u * 100, 2))
}

/// Strategy to generate a group of 2 to 8 members with some expenses.
fn group_strategy() -> impl Strategy<Value = (Vec<MemberId>, Vec<Expense>)> {
    group_with(cents())
}

fn group_with(
    amount: impl Strategy<Value = Decimal> + Clone,
) -> impl Strategy<Value = (Vec<MemberId>, Vec<Expense>)> {
    (2usize..=8).prop_flat_map(move |n| {
        let expense = (0..n, prop::collection::vec((0..n, amount.clone()), 1..=n));
        prop::collection::vec(expense, 0..12).prop_map(move |raw| {
            let expenses = raw
                .into_iter()
                .map(|(payer, splits)| Expense {
                    id: ExpenseId::new(),
                    paid_by: member(payer),
                    amount: splits.iter().map(|(_, amount)| *amount).sum(),
                    splits: splits
                        .into_iter()
                        .map(|(owed_by, amount)| ExpenseSplit::new(member(owed_by), amount))
                        .collect(),
                })
                .collect();
            ((0..n).map(member).collect(), expenses)
        })
    })
}

/// Most a plan can leave behind: one tolerance of dust per member.
fn dust_bound(tolerance: Tolerance, members: usize) -> Decimal {
    tolerance.value() * Decimal::from(members)
}

fn balances_for(members: &[MemberId], expenses: &[Expense], settlements: &[Settlement]) -> Vec<NetBalance> {
    let ledger = build_ledger(members, expenses, settlements).unwrap();
    aggregate(&ledger, members).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* group with whole-unit amounts, the plan moves exactly the
    /// total owed to creditors.
    #[test]
    fn prop_total_matches_credit((members, expenses) in group_with(whole_units())) {
        let balances = balances_for(&members, &expenses, &[]);
        let tolerance = Tolerance::default();

        let transactions = optimize(&balances, tolerance);

        let moved: Decimal = transactions.iter().map(|t| t.amount).sum();
        let credit: Decimal = balances
            .iter()
            .map(|b| b.net_balance)
            .filter(|net| tolerance.is_significant_credit(*net))
            .sum();
        prop_assert_eq!(moved, credit);
    }

    /// *For any* group, the plan moves the total owed to creditors, short by
    /// at most the dropped dust.
    #[test]
    fn prop_total_within_dust_of_credit((members, expenses) in group_strategy()) {
        let balances = balances_for(&members, &expenses, &[]);
        let tolerance = Tolerance::default();

        let moved: Decimal = optimize(&balances, tolerance).iter().map(|t| t.amount).sum();
        let credit: Decimal = balances
            .iter()
            .map(|b| b.net_balance)
            .filter(|net| tolerance.is_significant_credit(*net))
            .sum();
        prop_assert!(moved <= credit);
        prop_assert!(credit - moved <= dust_bound(tolerance, members.len()));
    }

    /// *For any* group of `n` members, the plan has at most `n - 1` payments,
    /// each positive and between distinct members.
    #[test]
    fn prop_bounded_transaction_count((members, expenses) in group_strategy()) {
        let balances = balances_for(&members, &expenses, &[]);

        let transactions = optimize(&balances, Tolerance::default());

        prop_assert!(transactions.len() < members.len());
        for t in &transactions {
            prop_assert!(t.amount > Decimal::ZERO);
            prop_assert_ne!(t.from, t.to);
        }
    }

    /// *For any* group with whole-unit amounts, recording the plan as
    /// completed settlements leaves every net balance at zero.
    #[test]
    fn prop_plan_settles_everything((members, expenses) in group_with(whole_units())) {
        let tolerance = Tolerance::default();
        let balances = balances_for(&members, &expenses, &[]);

        let settlements: Vec<Settlement> = optimize(&balances, tolerance)
            .into_iter()
            .map(|t| Settlement::completed(t.from, t.to, t.amount))
            .collect();
        let after = balances_for(&members, &expenses, &settlements);

        for balance in &after {
            prop_assert!(
                balance.net_balance.is_zero(),
                "member {} left with {}",
                balance.member_id,
                balance.net_balance
            );
        }
    }

    /// *For any* group, recording the plan leaves each member with no more
    /// than the dust the plan dropped.
    #[test]
    fn prop_plan_leaves_only_dust((members, expenses) in group_strategy()) {
        let tolerance = Tolerance::default();
        let balances = balances_for(&members, &expenses, &[]);

        let settlements: Vec<Settlement> = optimize(&balances, tolerance)
            .into_iter()
            .map(|t| Settlement::completed(t.from, t.to, t.amount))
            .collect();
        let after = balances_for(&members, &expenses, &settlements);

        for balance in &after {
            prop_assert!(balance.net_balance.abs() <= dust_bound(tolerance, members.len()));
        }
    }

    /// *For any* group, each debtor pays no more than their net debt.
    #[test]
    fn prop_debtors_pay_at_most_their_debt((members, expenses) in group_strategy()) {
        let balances = balances_for(&members, &expenses, &[]);

        let mut paid: HashMap<MemberId, Decimal> = HashMap::new();
        for t in optimize(&balances, Tolerance::default()) {
            *paid.entry(t.from).or_default() += t.amount;
        }

        for balance in &balances {
            let total = paid.get(&balance.member_id).copied().unwrap_or_default();
            prop_assert!(total <= (-balance.net_balance).max(Decimal::ZERO));
        }
    }

    /// *For any* group, the optimizer is deterministic.
    #[test]
    fn prop_deterministic((members, expenses) in group_strategy()) {
        let balances = balances_for(&members, &expenses, &[]);
        prop_assert_eq!(
            optimize(&balances, Tolerance::default()),
            optimize(&balances, Tolerance::default())
        );
    }

    /// *For any* ledger and payment no larger than what is owed, validation
    /// accepts it.
    #[test]
    fn prop_validator_accepts_owed_amounts(
        (members, expenses) in group_strategy(),
        fraction in 1u32..=100,
    ) {
        let tolerance = Tolerance::default();
        let ledger = build_ledger(&members, &expenses, &[]).unwrap();

        for debt in ledger.debts() {
            let amount = (debt.amount * Decimal::from(fraction) / Decimal::ONE_HUNDRED).round_dp(2);
            if amount.is_zero() {
                continue;
            }
            prop_assert_eq!(
                validate_settlement(&ledger, debt.debtor, debt.creditor, amount, tolerance),
                Ok(())
            );
        }
    }
}
