// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weight normalization.
//!
//! Converts raw weights into percentage shares that sum to 100.
//!
//! ## Rules
//!
//! - A participant with weight 0 is dropped from the output entirely
//! - If no participant has a positive weight, normalization fails with
//!   `NoEligibleParticipants`
//! - Shares are not rounded; rounding happens once, in the allocator
//! - Output order matches input order

use crate::error::DomainError;
use crate::weight::WeightedParticipant;

/// A participant's unrounded percentage share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedShare {
    /// The participant's identifier.
    pub participant_id: i64,
    /// Share of the total, in percent (`0 < share <= 100`).
    pub share: f64,
}

/// Normalizes weights into percentage shares.
///
/// # Errors
///
/// Returns an error if:
/// - Any weight is negative or not finite
/// - The weights sum to zero (including an empty input)
pub fn normalize_weights(
    weights: &[WeightedParticipant],
) -> Result<Vec<NormalizedShare>, DomainError> {
    if let Some(invalid) = weights
        .iter()
        .find(|w| !w.weight.is_finite() || w.weight < 0.0)
    {
        return Err(DomainError::InvalidWeight {
            participant_id: invalid.participant_id,
            value: invalid.weight,
        });
    }

    let total: f64 = weights.iter().map(|w| w.weight).sum();
    if total <= 0.0 {
        return Err(DomainError::NoEligibleParticipants);
    }

    Ok(weights
        .iter()
        .filter(|w| w.weight > 0.0)
        .map(|w| NormalizedShare {
            participant_id: w.participant_id,
            share: 100.0 * w.weight / total,
        })
        .collect())
}
