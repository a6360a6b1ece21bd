//! Property-based tests for ledger construction and balances.
//!
//! Covers skew-symmetry, conservation of net balances, the exact effect of a
//! single completed settlement, and independence from input order.

use divvy_shared::types::{ExpenseId, MemberId, SettlementId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance::{aggregate, conservation_residual};
use super::builder::build_ledger;
use super::types::{Expense, ExpenseSplit, Settlement, SettlementStatus};

/// A group's full history, as fetched by a collaborator.
#[derive(Debug, Clone)]
struct History {
    members: Vec<MemberId>,
    expenses: Vec<Expense>,
    settlements: Vec<Settlement>,
}

fn member(index: usize) -> MemberId {
    MemberId::from_uuid(Uuid::from_u128(index as u128 + 1))
}

/// Strategy to generate a positive amount in cents (0.01 to 1,000.00).
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy to generate a settlement status.
fn status_strategy() -> impl Strategy<Value = SettlementStatus> {
    prop_oneof![
        3 => Just(SettlementStatus::Completed),
        1 => Just(SettlementStatus::Pending),
        1 => Just(SettlementStatus::Cancelled),
    ]
}

/// Strategy to generate a consistent history for 2 to 6 members.
fn history_strategy() -> impl Strategy<Value = History> {
    (2usize..=6)
        .prop_flat_map(|n| {
            let expense = (0..n, prop::collection::vec((0..n, cents()), 1..=n));
            let settlement = (0..n, 0..n, cents(), status_strategy());
            (
                Just(n),
                prop::collection::vec(expense, 0..10),
                prop::collection::vec(settlement, 0..6),
            )
        })
        .prop_map(|(n, raw_expenses, raw_settlements)| {
            let expenses = raw_expenses
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
            let settlements = raw_settlements
                .into_iter()
                .map(|(from, to, amount, status)| {
                    let to = if from == to { (to + 1) % n } else { to };
                    Settlement {
                        id: SettlementId::new(),
                        from: member(from),
                        to: member(to),
                        amount,
                        status,
                        settled_at: None,
                    }
                })
                .collect();
            History {
                members: (0..n).map(member).collect(),
                expenses,
                settlements,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* history, `owed(a, b) == -owed(b, a)` and `owed(a, a) == 0`.
    #[test]
    fn prop_ledger_is_skew_symmetric(history in history_strategy()) {
        let ledger = build_ledger(&history.members, &history.expenses, &history.settlements).unwrap();

        prop_assert!(ledger.is_skew_symmetric());
        for &a in &history.members {
            prop_assert_eq!(ledger.owed(a, a).unwrap(), Decimal::ZERO);
            for &b in &history.members {
                prop_assert_eq!(ledger.owed(a, b).unwrap(), -ledger.owed(b, a).unwrap());
            }
        }
    }

    /// *For any* history, net balances across the group sum to zero.
    #[test]
    fn prop_net_balances_conserve(history in history_strategy()) {
        let ledger = build_ledger(&history.members, &history.expenses, &history.settlements).unwrap();
        let balances = aggregate(&ledger, &history.members).unwrap();

        prop_assert_eq!(conservation_residual(&balances), Decimal::ZERO);
    }

    /// *For any* member, `gross_owed - gross_owing` equals the negated row sum.
    #[test]
    fn prop_net_balance_equals_negated_row_sum(history in history_strategy()) {
        let ledger = build_ledger(&history.members, &history.expenses, &history.settlements).unwrap();
        let balances = aggregate(&ledger, &history.members).unwrap();

        for balance in &balances {
            let row_sum: Decimal = ledger.row(balance.member_id).unwrap().map(|(_, a)| a).sum();
            prop_assert_eq!(balance.net_balance, -row_sum);
            prop_assert!(balance.gross_owed >= Decimal::ZERO);
            prop_assert!(balance.gross_owing >= Decimal::ZERO);
        }
    }

    /// *For any* history and extra completed settlement `from -> to`, only
    /// `owed(from, to)` (by `-amount`) and its mirror cell change.
    #[test]
    fn prop_settlement_touches_one_pair(
        history in history_strategy(),
        from_seed in any::<prop::sample::Index>(),
        to_offset in 1usize..6,
        amount in cents(),
    ) {
        let n = history.members.len();
        let from_index = from_seed.index(n);
        let to_index = (from_index + 1 + to_offset % (n - 1)) % n;
        let (from, to) = (member(from_index), member(to_index));

        let before = build_ledger(&history.members, &history.expenses, &history.settlements).unwrap();
        let mut settlements = history.settlements.clone();
        settlements.push(Settlement::completed(from, to, amount));
        let after = build_ledger(&history.members, &history.expenses, &settlements).unwrap();

        for &a in &history.members {
            for &b in &history.members {
                let delta = after.owed(a, b).unwrap() - before.owed(a, b).unwrap();
                let expected = if (a, b) == (from, to) {
                    -amount
                } else if (a, b) == (to, from) {
                    amount
                } else {
                    Decimal::ZERO
                };
                prop_assert_eq!(delta, expected);
            }
        }
    }

    /// *For any* history, reversing the input order yields the same ledger.
    #[test]
    fn prop_input_order_irrelevant(history in history_strategy()) {
        let forward = build_ledger(&history.members, &history.expenses, &history.settlements).unwrap();

        let mut members = history.members.clone();
        let mut expenses = history.expenses.clone();
        let mut settlements = history.settlements.clone();
        members.reverse();
        expenses.reverse();
        settlements.reverse();
        let backward = build_ledger(&members, &expenses, &settlements).unwrap();

        prop_assert_eq!(forward, backward);
    }
}
