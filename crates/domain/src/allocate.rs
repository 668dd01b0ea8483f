// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary allocation of normalized shares.
//!
//! ## Rounding
//!
//! - Shares are rounded to whole hundredths of a percent with the largest
//!   remainder method, so the stored percentages sum to exactly 100
//! - Ties between equal remainders go to the earlier participant
//! - A participant whose share rounds to zero hundredths gets no row
//! - `amount = round(total_profit * percentage / 100)`, rounding half up,
//!   from the stored percentage
//!
//! Independently rounded amounts may not sum to `total_profit`. No
//! residual correction is applied; `allocation_residual` reports the
//! difference so callers can surface it.

use crate::error::DomainError;
use crate::normalize::NormalizedShare;
use num_traits::ToPrimitive;

/// Hundredths of a percent in a full allocation.
const FULL_HUNDREDTHS: f64 = 10_000.0;

/// One participant's computed share of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    /// The participant's identifier.
    pub participant_id: i64,
    /// The unrounded share, in percent.
    pub share: f64,
    /// The share apportioned to 2 decimals, as stored.
    pub percentage: f64,
    /// The allocated amount in whole currency units.
    pub amount: i64,
}

/// Computes `round(total_profit * percentage / 100)`.
///
/// This is the single amount formula shared by automatic and manual
/// allocation.
///
/// # Errors
///
/// Returns an error if the inputs are not finite or the result does not
/// fit in an `i64`.
pub fn compute_amount(total_profit: i64, percentage: f64) -> Result<i64, DomainError> {
    let out_of_range = || DomainError::AmountOutOfRange {
        total_profit,
        percentage,
    };

    let profit: f64 = total_profit.to_f64().ok_or_else(out_of_range)?;
    let raw: f64 = profit * percentage / 100.0;
    if !raw.is_finite() {
        return Err(out_of_range());
    }

    raw.round().to_i64().ok_or_else(out_of_range)
}

/// Rounds shares to hundredths of a percent that sum to exactly 10,000.
///
/// Each share is floored, then the hundredths still missing are handed
/// out one at a time in order of largest fractional remainder.
fn apportion_hundredths(
    total_profit: i64,
    shares: &[NormalizedShare],
) -> Result<Vec<f64>, DomainError> {
    let mut floors: Vec<f64> = Vec::with_capacity(shares.len());
    let mut remainders: Vec<f64> = Vec::with_capacity(shares.len());
    for s in shares {
        let raw: f64 = s.share * 100.0;
        if !raw.is_finite() || raw < 0.0 {
            return Err(DomainError::AmountOutOfRange {
                total_profit,
                percentage: s.share,
            });
        }
        let floor: f64 = raw.floor();
        floors.push(floor);
        remainders.push(raw - floor);
    }

    let missing: usize = (FULL_HUNDREDTHS - floors.iter().sum::<f64>())
        .round()
        .to_usize()
        .unwrap_or(0);

    let mut order: Vec<usize> = (0..shares.len()).collect();
    // Stable sort: equal remainders keep input order.
    order.sort_by(|&i, &j| remainders[j].total_cmp(&remainders[i]));
    for &index in order.iter().take(missing) {
        floors[index] += 1.0;
    }

    Ok(floors)
}

/// Allocates `total_profit` across normalized shares, preserving order.
///
/// Participants whose share rounds to less than 0.01% are left out.
///
/// # Errors
///
/// Returns an error if `total_profit` is negative, a share is not a
/// finite non-negative number, or an amount overflows.
pub fn allocate(
    total_profit: i64,
    shares: &[NormalizedShare],
) -> Result<Vec<Allocation>, DomainError> {
    if total_profit < 0 {
        return Err(DomainError::InvalidTotalProfit {
            value: total_profit,
        });
    }

    let hundredths: Vec<f64> = apportion_hundredths(total_profit, shares)?;

    shares
        .iter()
        .zip(hundredths)
        .filter(|(_, h)| *h > 0.0)
        .map(|(s, h)| {
            let percentage: f64 = h / 100.0;
            Ok(Allocation {
                participant_id: s.participant_id,
                share: s.share,
                percentage,
                amount: compute_amount(total_profit, percentage)?,
            })
        })
        .collect()
}

/// Returns `total_profit` minus the sum of allocated amounts.
///
/// A non-zero value is the rounding residual left unreconciled.
#[must_use]
pub fn allocation_residual(total_profit: i64, allocations: &[Allocation]) -> i64 {
    let allocated: i64 = allocations
        .iter()
        .fold(0_i64, |acc, a| acc.saturating_add(a.amount));
    total_profit.saturating_sub(allocated)
}
