// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    MemoryStore, create_test_actor, create_test_cause, create_test_distribution,
};
use crate::{CoreError, add_manual_detail};
use profit_share_domain::{DistributionState, DomainError, compute_amount};

fn setup() -> (MemoryStore, i64, Vec<i64>) {
    let mut store = MemoryStore::new();
    let participants: Vec<i64> = (0..4)
        .map(|n| store.add_participant(&format!("P{n}"), 1_000.0, None, true))
        .collect();
    let distribution_id = create_test_distribution(&mut store, 3_000_000);
    (store, distribution_id, participants)
}

#[test]
fn test_manual_detail_computes_amount_from_total_profit() {
    let (mut store, distribution_id, participants) = setup();

    let transition = add_manual_detail(
        &mut store,
        distribution_id,
        participants[0],
        42.5,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let detail = transition.value;
    assert!(detail.detail_id().is_some());
    assert_eq!(detail.percentage(), 42.5);
    assert_eq!(detail.amount(), 1_275_000);
    assert_eq!(Ok(detail.amount()), compute_amount(3_000_000, 42.5));
    assert_eq!(store.state_of(distribution_id), DistributionState::Pending);
    assert_eq!(transition.audit_event.action.name, "AddManualDetail");
}

#[test]
fn test_reaching_one_hundred_percent_marks_distributed() {
    let (mut store, distribution_id, participants) = setup();

    for (participant_id, percentage) in [(participants[0], 60.0), (participants[1], 40.0)] {
        add_manual_detail(
            &mut store,
            distribution_id,
            participant_id,
            percentage,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    }

    assert_eq!(
        store.state_of(distribution_id),
        DistributionState::Distributed
    );
}

#[test]
fn test_over_allocation_is_rejected_and_nothing_persisted() {
    let (mut store, distribution_id, participants) = setup();

    add_manual_detail(
        &mut store,
        distribution_id,
        participants[0],
        60.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let result = add_manual_detail(
        &mut store,
        distribution_id,
        participants[1],
        45.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::OverAllocation {
            distribution_id,
            allocated: 60.0,
            requested: 45.0,
        })
    );
    assert_eq!(store.details_for(distribution_id).len(), 1);
    assert_eq!(store.state_of(distribution_id), DistributionState::Pending);
}

#[test]
fn test_duplicate_participant_is_rejected() {
    let (mut store, distribution_id, participants) = setup();

    add_manual_detail(
        &mut store,
        distribution_id,
        participants[0],
        10.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let result = add_manual_detail(
        &mut store,
        distribution_id,
        participants[0],
        5.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateParticipant {
            distribution_id,
            participant_id: participants[0],
        })
    );
    assert_eq!(store.details_for(distribution_id).len(), 1);
}

#[test]
fn test_percentage_out_of_range_is_rejected() {
    let (mut store, distribution_id, participants) = setup();

    for percentage in [0.0, -1.0, 100.5] {
        let result = add_manual_detail(
            &mut store,
            distribution_id,
            participants[0],
            percentage,
            create_test_actor(),
            create_test_cause(),
        );
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::InvalidPercentage { .. }
            ))
        ));
    }
    assert!(store.details_for(distribution_id).is_empty());
}

#[test]
fn test_unknown_participant_is_rejected() {
    let (mut store, distribution_id, _) = setup();

    let result = add_manual_detail(
        &mut store,
        distribution_id,
        9_999,
        10.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ParticipantNotFound(9_999))
    );
}

#[test]
fn test_unknown_distribution_is_rejected() {
    let (mut store, _, participants) = setup();

    let result = add_manual_detail(
        &mut store,
        9_999,
        participants[0],
        10.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DistributionNotFound(9_999))
    );
}

#[test]
fn test_inactive_participant_may_receive_manual_detail() {
    let (mut store, distribution_id, _) = setup();
    let inactive = store.add_participant("Retired", 0.0, None, false);

    let result = add_manual_detail(
        &mut store,
        distribution_id,
        inactive,
        5.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_failed_insert_leaves_state_unchanged() {
    let (mut store, distribution_id, participants) = setup();
    store.fail_insert_detail = true;

    let result = add_manual_detail(
        &mut store,
        distribution_id,
        participants[0],
        100.0,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::Store(_))));
    assert!(store.details_for(distribution_id).is_empty());
    assert_eq!(store.state_of(distribution_id), DistributionState::Pending);
}
