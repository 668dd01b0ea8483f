// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and the pure allocation pipeline.
//!
//! Allocation runs in three side-effect-free stages:
//!
//! 1. `compute_weights`: investment scaled by role importance
//! 2. `normalize_weights`: weights to percentage shares summing to 100
//! 3. `allocate`: shares to whole-currency amounts
//!
//! Each stage is deterministic: identical inputs produce bit-identical
//! outputs in the same order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocate;
mod error;
mod normalize;
mod types;
mod validation;
mod weight;

#[cfg(test)]
mod tests;

pub use allocate::{Allocation, allocate, allocation_residual, compute_amount};
pub use normalize::{NormalizedShare, normalize_weights};
pub use weight::{WeightedParticipant, compute_weight, compute_weights};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Distribution, DistributionDetail, DistributionState, Participant, ParticipantStanding, Role,
};
pub use validation::{
    MAX_PERCENTAGE, MAX_PERIOD_LENGTH, PERCENTAGE_TOLERANCE, is_fully_allocated,
    total_percentage, validate_allocation_capacity, validate_participant_unallocated,
    validate_percentage, validate_period, validate_total_profit,
};

/// Runs the full pure pipeline: weights, normalization, allocation.
///
/// # Errors
///
/// Returns an error if any standing is invalid, no participant has a
/// positive weight, or an amount overflows.
pub fn compute_allocations(
    total_profit: i64,
    standings: &[ParticipantStanding],
) -> Result<Vec<Allocation>, DomainError> {
    let weights: Vec<WeightedParticipant> = compute_weights(standings)?;
    let shares: Vec<NormalizedShare> = normalize_weights(&weights)?;
    allocate(total_profit, &shares)
}
