// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use profit_share::DistributionStore;
use profit_share_domain::ParticipantStanding;

#[test]
fn test_create_participant_round_trips() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let role = persistence.create_role("Partner", 50.0).unwrap();

    let created = persistence
        .create_participant("Alice", 1_250.5, role.role_id(), true)
        .unwrap();
    let listed = persistence.list_participants().unwrap();

    assert_eq!(listed, vec![created]);
    assert_eq!(listed[0].name(), "Alice");
    assert_eq!(listed[0].investment_total(), 1_250.5);
    assert_eq!(listed[0].role_id(), role.role_id());
    assert!(listed[0].is_active());
}

#[test]
fn test_create_participant_with_unknown_role_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_participant("Alice", 1.0, Some(42), true);

    assert_eq!(result, Err(PersistenceError::RoleNotFound(42)));
}

#[test]
fn test_negative_importance_is_rejected_by_schema() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(matches!(
        persistence.create_role("Broken", -1.0),
        Err(PersistenceError::DatabaseError(_))
    ));
}

#[test]
fn test_update_investment_and_active_flag() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id = persistence
        .create_participant("Bob", 10.0, None, true)
        .unwrap()
        .participant_id()
        .unwrap();

    persistence.update_participant_investment(id, 99.0).unwrap();
    persistence.set_participant_active(id, false).unwrap();

    let participant = &persistence.list_participants().unwrap()[0];
    assert_eq!(participant.investment_total(), 99.0);
    assert!(!participant.is_active());
}

#[test]
fn test_updates_on_unknown_participant_fail() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence.update_participant_investment(7, 1.0),
        Err(PersistenceError::ParticipantNotFound(7))
    );
    assert_eq!(
        persistence.set_participant_active(7, true),
        Err(PersistenceError::ParticipantNotFound(7))
    );
}

#[test]
fn test_standings_join_role_importance() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let role = persistence.create_role("Manager", 25.0).unwrap();
    let with_role = persistence
        .create_participant("With role", 100.0, role.role_id(), true)
        .unwrap()
        .participant_id()
        .unwrap();
    let without_role = persistence
        .create_participant("Without role", 200.0, None, false)
        .unwrap()
        .participant_id()
        .unwrap();

    let standings = persistence
        .with_transaction(|store| {
            store
                .list_participants_with_roles()
                .map_err(|e| PersistenceError::QueryFailed(e.to_string()))
        })
        .unwrap();

    assert_eq!(
        standings,
        vec![
            ParticipantStanding::new(with_role, 100.0, Some(25.0), true),
            ParticipantStanding::new(without_role, 200.0, None, false),
        ]
    );
}
