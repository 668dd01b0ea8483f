// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use profit_share_domain::{
    Distribution, DistributionDetail, DistributionState, Participant, ParticipantStanding, Role,
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::diesel_schema::{distribution_details, distributions, participants, roles};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoleRow {
    pub role_id: i64,
    pub name: String,
    pub importance: f64,
}

impl RoleRow {
    pub fn into_domain(self) -> Role {
        Role::with_id(self.role_id, &self.name, self.importance)
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub name: String,
    pub investment_total: f64,
    pub role_id: Option<i64>,
    pub active: i32,
}

impl ParticipantRow {
    pub fn into_domain(self) -> Participant {
        Participant::with_id(
            self.participant_id,
            &self.name,
            self.investment_total,
            self.role_id,
            self.active != 0,
        )
    }
}

/// A participant joined with its role's importance, if any.
pub type StandingRow = (i64, f64, i32, Option<f64>);

pub fn standing_from_row(row: StandingRow) -> ParticipantStanding {
    let (participant_id, investment_total, active, role_importance) = row;
    ParticipantStanding::new(participant_id, investment_total, role_importance, active != 0)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = distributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DistributionRow {
    pub distribution_id: i64,
    pub period: String,
    pub distribution_date: String,
    pub total_profit: i64,
    pub state: String,
}

impl DistributionRow {
    /// Converts a stored row back into a `Distribution`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date or state cannot be parsed.
    pub fn into_domain(self) -> Result<Distribution, PersistenceError> {
        let distribution_date: Date = Date::parse(
            &self.distribution_date,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Failed to parse distribution_date '{}': {e}",
                self.distribution_date
            ))
        })?;

        let state: DistributionState = self.state.parse().map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Distribution {} has invalid state: {e}",
                self.distribution_id
            ))
        })?;

        Ok(Distribution::with_id(
            self.distribution_id,
            &self.period,
            distribution_date,
            self.total_profit,
            state,
        ))
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = distribution_details)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DistributionDetailRow {
    pub detail_id: i64,
    pub distribution_id: i64,
    pub participant_id: i64,
    pub percentage: f64,
    pub amount: i64,
}

impl DistributionDetailRow {
    pub const fn into_domain(self) -> DistributionDetail {
        DistributionDetail::with_id(
            self.detail_id,
            self.distribution_id,
            self.participant_id,
            self.percentage,
            self.amount,
        )
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = distribution_details)]
pub struct NewDistributionDetail {
    pub distribution_id: i64,
    pub participant_id: i64,
    pub percentage: f64,
    pub amount: i64,
}

impl From<&DistributionDetail> for NewDistributionDetail {
    fn from(detail: &DistributionDetail) -> Self {
        Self {
            distribution_id: detail.distribution_id(),
            participant_id: detail.participant_id(),
            percentage: detail.percentage(),
            amount: detail.amount(),
        }
    }
}
