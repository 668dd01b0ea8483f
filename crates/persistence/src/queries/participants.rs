// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use profit_share_domain::{Participant, ParticipantStanding, Role};

use crate::data_models::{
    ParticipantRow, RoleRow, StandingRow, standing_from_row,
};
use crate::diesel_schema::{participants, roles};
use crate::error::PersistenceError;

/// Loads a participant by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_participant(
    conn: &mut SqliteConnection,
    participant_id: i64,
) -> Result<Option<Participant>, PersistenceError> {
    let row: Option<ParticipantRow> = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_participant: {e}")))?;

    Ok(row.map(ParticipantRow::into_domain))
}

/// Lists every participant ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_participants(
    conn: &mut SqliteConnection,
) -> Result<Vec<Participant>, PersistenceError> {
    let rows: Vec<ParticipantRow> = participants::table
        .order(participants::participant_id.asc())
        .select(ParticipantRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_participants: {e}")))?;

    Ok(rows.into_iter().map(ParticipantRow::into_domain).collect())
}

/// Loads a role by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_role(conn: &mut SqliteConnection, role_id: i64) -> Result<Option<Role>, PersistenceError> {
    let row: Option<RoleRow> = roles::table
        .filter(roles::role_id.eq(role_id))
        .select(RoleRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_role: {e}")))?;

    Ok(row.map(RoleRow::into_domain))
}

/// Lists every participant with its role importance, ordered by ID.
///
/// A participant without a role, or whose role is gone, has no importance.
/// Inactive participants are included.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_participants_with_roles(
    conn: &mut SqliteConnection,
) -> Result<Vec<ParticipantStanding>, PersistenceError> {
    let rows: Vec<StandingRow> = participants::table
        .left_join(roles::table)
        .order(participants::participant_id.asc())
        .select((
            participants::participant_id,
            participants::investment_total,
            participants::active,
            roles::importance.nullable(),
        ))
        .load(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_participants_with_roles: {e}"))
        })?;

    Ok(rows.into_iter().map(standing_from_row).collect())
}
