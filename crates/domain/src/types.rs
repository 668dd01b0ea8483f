// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Represents the lifecycle state of a distribution.
///
/// A distribution starts `Pending` and becomes `Distributed` once its
/// detail rows account for 100% of the profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DistributionState {
    /// Created, allocation incomplete or not started.
    #[default]
    Pending,
    /// Detail rows sum to 100% within tolerance.
    Distributed,
}

impl FromStr for DistributionState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Distributed" => Ok(Self::Distributed),
            _ => Err(DomainError::InvalidDistributionState(s.to_string())),
        }
    }
}

impl std::fmt::Display for DistributionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DistributionState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Distributed => "Distributed",
        }
    }
}

/// A role a participant may hold.
///
/// Importance is a percentage-like bonus multiplier with no upper bound
/// and no requirement that importances across roles sum to anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    role_id: Option<i64>,
    name: String,
    importance: f64,
}

impl Role {
    /// Creates a role that has not been persisted yet.
    #[must_use]
    pub fn new(name: &str, importance: f64) -> Self {
        Self {
            role_id: None,
            name: name.to_string(),
            importance,
        }
    }

    /// Creates a role with a persisted identifier.
    #[must_use]
    pub fn with_id(role_id: i64, name: &str, importance: f64) -> Self {
        Self {
            role_id: Some(role_id),
            name: name.to_string(),
            importance,
        }
    }

    #[must_use]
    pub const fn role_id(&self) -> Option<i64> {
        self.role_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn importance(&self) -> f64 {
        self.importance
    }
}

/// A person who may share in a distribution.
///
/// Participants are owned by external bookkeeping; the allocation engine
/// only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    participant_id: Option<i64>,
    name: String,
    investment_total: f64,
    role_id: Option<i64>,
    active: bool,
}

impl Participant {
    /// Creates a participant that has not been persisted yet.
    #[must_use]
    pub fn new(name: &str, investment_total: f64, role_id: Option<i64>, active: bool) -> Self {
        Self {
            participant_id: None,
            name: name.to_string(),
            investment_total,
            role_id,
            active,
        }
    }

    /// Creates a participant with a persisted identifier.
    #[must_use]
    pub fn with_id(
        participant_id: i64,
        name: &str,
        investment_total: f64,
        role_id: Option<i64>,
        active: bool,
    ) -> Self {
        Self {
            participant_id: Some(participant_id),
            name: name.to_string(),
            investment_total,
            role_id,
            active,
        }
    }

    #[must_use]
    pub const fn participant_id(&self) -> Option<i64> {
        self.participant_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn investment_total(&self) -> f64 {
        self.investment_total
    }

    #[must_use]
    pub const fn role_id(&self) -> Option<i64> {
        self.role_id
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// The allocation-relevant view of a participant joined with its role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStanding {
    /// The participant's identifier.
    pub participant_id: i64,
    /// Accumulated investment.
    pub investment_total: f64,
    /// The role's importance, `None` when unassigned or the role is missing.
    pub role_importance: Option<f64>,
    /// Whether the participant is active. Not used as a filter by
    /// automatic allocation.
    pub active: bool,
}

impl ParticipantStanding {
    #[must_use]
    pub const fn new(
        participant_id: i64,
        investment_total: f64,
        role_importance: Option<f64>,
        active: bool,
    ) -> Self {
        Self {
            participant_id,
            investment_total,
            role_importance,
            active,
        }
    }
}

/// One profit-sharing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    distribution_id: Option<i64>,
    period: String,
    distribution_date: Date,
    total_profit: i64,
    state: DistributionState,
}

impl Distribution {
    /// Creates a new, unpersisted distribution in the `Pending` state.
    #[must_use]
    pub fn new(period: &str, distribution_date: Date, total_profit: i64) -> Self {
        Self {
            distribution_id: None,
            period: period.trim().to_string(),
            distribution_date,
            total_profit,
            state: DistributionState::Pending,
        }
    }

    /// Reconstructs a persisted distribution.
    #[must_use]
    pub fn with_id(
        distribution_id: i64,
        period: &str,
        distribution_date: Date,
        total_profit: i64,
        state: DistributionState,
    ) -> Self {
        Self {
            distribution_id: Some(distribution_id),
            period: period.to_string(),
            distribution_date,
            total_profit,
            state,
        }
    }

    #[must_use]
    pub const fn distribution_id(&self) -> Option<i64> {
        self.distribution_id
    }

    #[must_use]
    pub fn period(&self) -> &str {
        &self.period
    }

    #[must_use]
    pub const fn distribution_date(&self) -> Date {
        self.distribution_date
    }

    #[must_use]
    pub const fn total_profit(&self) -> i64 {
        self.total_profit
    }

    #[must_use]
    pub const fn state(&self) -> DistributionState {
        self.state
    }

    /// Returns a copy of this distribution in the given state.
    #[must_use]
    pub fn with_state(&self, state: DistributionState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    /// Returns a copy of this distribution with a corrected total profit.
    #[must_use]
    pub fn with_total_profit(&self, total_profit: i64) -> Self {
        Self {
            total_profit,
            ..self.clone()
        }
    }
}

/// One participant's share of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionDetail {
    detail_id: Option<i64>,
    distribution_id: i64,
    participant_id: i64,
    percentage: f64,
    amount: i64,
}

impl DistributionDetail {
    /// Creates a new, unpersisted detail row.
    #[must_use]
    pub const fn new(distribution_id: i64, participant_id: i64, percentage: f64, amount: i64) -> Self {
        Self {
            detail_id: None,
            distribution_id,
            participant_id,
            percentage,
            amount,
        }
    }

    /// Reconstructs a persisted detail row.
    #[must_use]
    pub const fn with_id(
        detail_id: i64,
        distribution_id: i64,
        participant_id: i64,
        percentage: f64,
        amount: i64,
    ) -> Self {
        Self {
            detail_id: Some(detail_id),
            distribution_id,
            participant_id,
            percentage,
            amount,
        }
    }

    #[must_use]
    pub const fn detail_id(&self) -> Option<i64> {
        self.detail_id
    }

    #[must_use]
    pub const fn distribution_id(&self) -> i64 {
        self.distribution_id
    }

    #[must_use]
    pub const fn participant_id(&self) -> i64 {
        self.participant_id
    }

    #[must_use]
    pub const fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }
}
