// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant weight calculation.
//!
//! A participant's weight is their investment scaled by their role's
//! importance bonus:
//!
//! ```text
//! weight = investment_total * (1 + importance / 100)
//! ```
//!
//! Investment is the multiplicative base, so a participant with no
//! investment has zero weight no matter how important their role is.
//! Participants without a role (or whose role cannot be found) are
//! weighted with importance 0.

use crate::error::DomainError;
use crate::types::ParticipantStanding;

/// A participant's raw allocation driver before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedParticipant {
    /// The participant's identifier.
    pub participant_id: i64,
    /// The computed weight (always finite and non-negative).
    pub weight: f64,
}

/// Computes the weight of a single participant.
///
/// # Errors
///
/// Returns an error if `investment_total` or `importance` is negative
/// or not finite. Values are never clamped.
pub fn compute_weight(investment_total: f64, importance: f64) -> Result<f64, DomainError> {
    if !investment_total.is_finite() || investment_total < 0.0 {
        return Err(DomainError::InvalidInvestment {
            value: investment_total,
        });
    }
    if !importance.is_finite() || importance < 0.0 {
        return Err(DomainError::InvalidImportance { value: importance });
    }

    Ok(investment_total * (1.0 + importance / 100.0))
}

/// Computes weights for every standing, preserving input order.
///
/// A missing role importance counts as 0.
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn compute_weights(
    standings: &[ParticipantStanding],
) -> Result<Vec<WeightedParticipant>, DomainError> {
    standings
        .iter()
        .map(|standing| {
            let importance: f64 = standing.role_importance.unwrap_or(0.0);
            compute_weight(standing.investment_total, importance).map(|weight| {
                WeightedParticipant {
                    participant_id: standing.participant_id,
                    weight,
                }
            })
        })
        .collect()
}
