// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::DistributionDetail;

/// Tolerance used when deciding whether a distribution is fully allocated.
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// The whole of a distribution, in percent.
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Maximum length of a period label.
pub const MAX_PERIOD_LENGTH: usize = 100;

/// Slack for float noise around the 100% boundary.
const CEILING_EPSILON: f64 = 1e-9;

/// Validates a distribution's total profit.
///
/// # Errors
///
/// Returns an error if the total profit is zero or negative.
pub const fn validate_total_profit(total_profit: i64) -> Result<(), DomainError> {
    if total_profit <= 0 {
        return Err(DomainError::InvalidTotalProfit {
            value: total_profit,
        });
    }
    Ok(())
}

/// Validates a detail percentage lies in `(0, 100]`.
///
/// # Errors
///
/// Returns an error if the percentage is out of range or not finite.
pub fn validate_percentage(percentage: f64) -> Result<(), DomainError> {
    if !percentage.is_finite() || percentage <= 0.0 || percentage > MAX_PERCENTAGE {
        return Err(DomainError::InvalidPercentage { value: percentage });
    }
    Ok(())
}

/// Validates a period label.
///
/// # Errors
///
/// Returns an error if the label is blank or longer than
/// `MAX_PERIOD_LENGTH` characters.
pub fn validate_period(period: &str) -> Result<(), DomainError> {
    let trimmed: &str = period.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPeriod(String::from(
            "Period cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_PERIOD_LENGTH {
        return Err(DomainError::InvalidPeriod(format!(
            "Period cannot exceed {MAX_PERIOD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates that `requested` more percent fits on top of `allocated`.
///
/// # Errors
///
/// Returns `OverAllocation` if the sum would exceed 100%.
pub fn validate_allocation_capacity(
    distribution_id: i64,
    allocated: f64,
    requested: f64,
) -> Result<(), DomainError> {
    if allocated + requested > MAX_PERCENTAGE + CEILING_EPSILON {
        return Err(DomainError::OverAllocation {
            distribution_id,
            allocated,
            requested,
        });
    }
    Ok(())
}

/// Validates that a participant has no detail row yet.
///
/// # Errors
///
/// Returns `DuplicateParticipant` if a row already exists.
pub fn validate_participant_unallocated(
    distribution_id: i64,
    participant_id: i64,
    details: &[DistributionDetail],
) -> Result<(), DomainError> {
    if details.iter().any(|d| d.participant_id() == participant_id) {
        return Err(DomainError::DuplicateParticipant {
            distribution_id,
            participant_id,
        });
    }
    Ok(())
}

/// Sums the percentages of a set of detail rows.
#[must_use]
pub fn total_percentage(details: &[DistributionDetail]) -> f64 {
    details.iter().map(DistributionDetail::percentage).sum()
}

/// Returns true if `sum` is within tolerance of 100%.
#[must_use]
pub fn is_fully_allocated(sum: f64) -> bool {
    (sum - MAX_PERCENTAGE).abs() <= PERCENTAGE_TOLERANCE + CEILING_EPSILON
}
