// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::DistributionState;

/// Errors that can occur during domain validation and allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A participant's investment total is negative or not finite.
    InvalidInvestment {
        /// The rejected value.
        value: f64,
    },
    /// A role importance is negative or not finite.
    InvalidImportance {
        /// The rejected value.
        value: f64,
    },
    /// A computed or supplied weight is negative or not finite.
    InvalidWeight {
        /// The participant the weight belongs to.
        participant_id: i64,
        /// The rejected value.
        value: f64,
    },
    /// A distribution's total profit must be strictly positive.
    InvalidTotalProfit {
        /// The rejected value.
        value: i64,
    },
    /// A detail percentage must be in `(0, 100]`.
    InvalidPercentage {
        /// The rejected value.
        value: f64,
    },
    /// Period label is empty or too long.
    InvalidPeriod(String),
    /// An allocated amount does not fit the currency range.
    AmountOutOfRange {
        /// The total profit being split.
        total_profit: i64,
        /// The percentage being applied.
        percentage: f64,
    },
    /// A distribution state string could not be parsed.
    InvalidDistributionState(String),
    /// Automatic allocation found no participant with a positive weight.
    NoEligibleParticipants,
    /// The participant already holds a detail row in this distribution.
    DuplicateParticipant {
        /// The distribution.
        distribution_id: i64,
        /// The participant.
        participant_id: i64,
    },
    /// Adding the detail would push the distribution past 100%.
    OverAllocation {
        /// The distribution.
        distribution_id: i64,
        /// Percentage already allocated.
        allocated: f64,
        /// Percentage requested.
        requested: f64,
    },
    /// The distribution is in a state that forbids the operation.
    InvalidState {
        /// The distribution.
        distribution_id: i64,
        /// Its current state.
        state: DistributionState,
        /// Why the operation was refused.
        reason: String,
    },
    /// Distribution does not exist.
    DistributionNotFound(i64),
    /// Distribution detail does not exist.
    DetailNotFound(i64),
    /// Participant does not exist.
    ParticipantNotFound(i64),
}

impl DomainError {
    /// Returns the name of the error class this violation belongs to.
    ///
    /// Callers use this to translate errors into user-facing messages
    /// without matching on every variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInvestment { .. }
            | Self::InvalidImportance { .. }
            | Self::InvalidWeight { .. }
            | Self::InvalidTotalProfit { .. }
            | Self::InvalidPercentage { .. }
            | Self::InvalidPeriod(_)
            | Self::AmountOutOfRange { .. }
            | Self::InvalidDistributionState(_) => "InvalidInputError",
            Self::NoEligibleParticipants => "NoEligibleParticipantsError",
            Self::DuplicateParticipant { .. } => "DuplicateParticipantError",
            Self::OverAllocation { .. } => "OverAllocationError",
            Self::InvalidState { .. } => "InvalidStateError",
            Self::DistributionNotFound(_)
            | Self::DetailNotFound(_)
            | Self::ParticipantNotFound(_) => "NotFoundError",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInvestment { value } => {
                write!(
                    f,
                    "Invalid investment total: {value}. Must be a finite, non-negative amount"
                )
            }
            Self::InvalidImportance { value } => {
                write!(
                    f,
                    "Invalid role importance: {value}. Must be a finite, non-negative number"
                )
            }
            Self::InvalidWeight {
                participant_id,
                value,
            } => {
                write!(
                    f,
                    "Invalid weight {value} for participant {participant_id}. Must be finite and non-negative"
                )
            }
            Self::InvalidTotalProfit { value } => {
                write!(
                    f,
                    "Invalid total profit: {value}. Total profit must be greater than zero"
                )
            }
            Self::InvalidPercentage { value } => {
                write!(
                    f,
                    "Invalid percentage: {value}. Must be greater than 0 and at most 100"
                )
            }
            Self::InvalidPeriod(msg) => write!(f, "Invalid period: {msg}"),
            Self::AmountOutOfRange {
                total_profit,
                percentage,
            } => {
                write!(
                    f,
                    "Amount for {percentage}% of {total_profit} is out of range"
                )
            }
            Self::InvalidDistributionState(s) => {
                write!(f, "Invalid distribution state: '{s}'")
            }
            Self::NoEligibleParticipants => {
                write!(
                    f,
                    "No participant has a positive weight; nothing can be allocated"
                )
            }
            Self::DuplicateParticipant {
                distribution_id,
                participant_id,
            } => {
                write!(
                    f,
                    "Participant {participant_id} already has an allocation in distribution {distribution_id}"
                )
            }
            Self::OverAllocation {
                distribution_id,
                allocated,
                requested,
            } => {
                write!(
                    f,
                    "Distribution {distribution_id} already allocates {allocated}%; adding {requested}% would exceed 100%"
                )
            }
            Self::InvalidState {
                distribution_id,
                state,
                reason,
            } => {
                write!(
                    f,
                    "Distribution {distribution_id} in state {state} cannot be processed: {reason}"
                )
            }
            Self::DistributionNotFound(id) => write!(f, "Distribution {id} not found"),
            Self::DetailNotFound(id) => write!(f, "Distribution detail {id} not found"),
            Self::ParticipantNotFound(id) => write!(f, "Participant {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
