// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and participant bookkeeping.
//!
//! Participant management lives outside the allocation engine; these
//! writes exist so the engine can be operated and tested on its own.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{participants, roles};
use crate::error::PersistenceError;

/// Inserts a role and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. negative importance).
pub fn insert_role(
    conn: &mut SqliteConnection,
    name: &str,
    importance: f64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(roles::table)
        .values((roles::name.eq(name), roles::importance.eq(importance)))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a participant and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. unknown role).
pub fn insert_participant(
    conn: &mut SqliteConnection,
    name: &str,
    investment_total: f64,
    role_id: Option<i64>,
    active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(participants::table)
        .values((
            participants::name.eq(name),
            participants::investment_total.eq(investment_total),
            participants::role_id.eq(role_id),
            participants::active.eq(i32::from(active)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Sets a participant's accumulated investment.
///
/// # Errors
///
/// Returns an error if the update fails or the participant does not exist.
pub fn update_participant_investment(
    conn: &mut SqliteConnection,
    participant_id: i64,
    investment_total: f64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        participants::table.filter(participants::participant_id.eq(participant_id)),
    )
    .set(participants::investment_total.eq(investment_total))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ParticipantNotFound(participant_id));
    }
    Ok(())
}

/// Marks a participant active or inactive.
///
/// # Errors
///
/// Returns an error if the update fails or the participant does not exist.
pub fn set_participant_active(
    conn: &mut SqliteConnection,
    participant_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        participants::table.filter(participants::participant_id.eq(participant_id)),
    )
    .set(participants::active.eq(i32::from(active)))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ParticipantNotFound(participant_id));
    }
    Ok(())
}
