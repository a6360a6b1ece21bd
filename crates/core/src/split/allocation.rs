//! Largest-remainder allocation.
//!
//! Each share is first rounded toward zero at the target scale; the minor
//! units lost that way are handed out one by one to the shares with the
//! largest fractional remainders, earliest share first on ties. The shares
//! always add up to the rounded total.

use std::cmp::Reverse;

use rust_decimal::prelude::*;

/// Splits `total` into `count` equal shares at `scale` decimal places.
///
/// The first shares receive the extra minor units:
/// 100 over 3 at scale 2 gives `[33.34, 33.33, 33.33]`.
#[must_use]
pub fn allocate_equal(total: Decimal, count: usize, scale: u32) -> Vec<Decimal> {
    allocate_by_weights(total, &vec![Decimal::ONE; count], scale)
}

/// Splits `total` proportionally to `percentages` at `scale` decimal places.
///
/// Shares are taken relative to the sum of `percentages`, so a set that is a
/// hair off 100 still allocates exactly `total`.
#[must_use]
pub fn allocate_by_percentages(total: Decimal, percentages: &[Decimal], scale: u32) -> Vec<Decimal> {
    allocate_by_weights(total, percentages, scale)
}

fn allocate_by_weights(total: Decimal, weights: &[Decimal], scale: u32) -> Vec<Decimal> {
    let weight_sum: Decimal = weights.iter().copied().sum();
    if weights.is_empty() || weight_sum <= Decimal::ZERO {
        return vec![Decimal::ZERO; weights.len()];
    }

    let unit = Decimal::new(1, scale);
    let total = total.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);

    let exact: Vec<Decimal> = weights.iter().map(|w| total * *w / weight_sum).collect();
    let mut shares: Vec<Decimal> = exact
        .iter()
        .map(|a| a.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
        .collect();

    let allocated: Decimal = shares.iter().copied().sum();
    let units = ((total - allocated) / unit)
        .trunc()
        .to_usize()
        .unwrap_or(0);
    if units == 0 {
        return shares;
    }

    let mut by_remainder: Vec<(usize, Decimal)> = exact
        .iter()
        .zip(&shares)
        .map(|(e, s)| *e - *s)
        .enumerate()
        .collect();
    // Stable, so equal remainders keep their original order.
    by_remainder.sort_by_key(|(_, remainder)| Reverse(*remainder));

    for (index, _) in by_remainder.into_iter().take(units) {
        shares[index] += unit;
    }

    shares
}
