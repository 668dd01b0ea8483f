// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    MemoryStore, create_test_actor, create_test_cause, create_test_distribution,
    seed_reference_participants,
};
use crate::{
    CoreError, add_manual_detail, distribution_summary, remove_detail, run_automatic_allocation,
};
use profit_share_domain::{DistributionState, DomainError};

#[test]
fn test_removing_detail_reverts_distributed_to_pending() {
    let mut store = MemoryStore::new();
    seed_reference_participants(&mut store);
    let distribution_id = create_test_distribution(&mut store, 3_000_000);
    let allocated = run_automatic_allocation(
        &mut store,
        distribution_id,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .value;
    let removed_id = allocated[0].detail_id().unwrap();

    let transition = remove_detail(
        &mut store,
        removed_id,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.value, allocated[0]);
    assert_eq!(store.details_for(distribution_id), vec![allocated[1].clone()]);
    assert_eq!(store.state_of(distribution_id), DistributionState::Pending);
    assert_eq!(transition.audit_event.action.name, "RemoveDetail");
    assert!(transition.audit_event.before.data.contains("state=Distributed"));
    assert!(transition.audit_event.after.data.contains("state=Pending"));
}

#[test]
fn test_removing_detail_from_pending_stays_pending() {
    let mut store = MemoryStore::new();
    let (a, b, _) = seed_reference_participants(&mut store);
    let distribution_id = create_test_distribution(&mut store, 1_000);
    let first = add_manual_detail(
        &mut store,
        distribution_id,
        a,
        30.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .value;
    add_manual_detail(
        &mut store,
        distribution_id,
        b,
        20.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    remove_detail(
        &mut store,
        first.detail_id().unwrap(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(store.details_for(distribution_id).len(), 1);
    assert_eq!(store.state_of(distribution_id), DistributionState::Pending);
}

#[test]
fn test_removed_capacity_can_be_reallocated() {
    let mut store = MemoryStore::new();
    let (a, b, c) = seed_reference_participants(&mut store);
    let distribution_id = create_test_distribution(&mut store, 1_000);
    let first = add_manual_detail(
        &mut store,
        distribution_id,
        a,
        60.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .value;
    add_manual_detail(
        &mut store,
        distribution_id,
        b,
        40.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    remove_detail(
        &mut store,
        first.detail_id().unwrap(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    add_manual_detail(
        &mut store,
        distribution_id,
        c,
        60.0,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(
        store.state_of(distribution_id),
        DistributionState::Distributed
    );
}

#[test]
fn test_remove_unknown_detail_is_not_found() {
    let mut store = MemoryStore::new();

    let result = remove_detail(&mut store, 77, create_test_actor(), create_test_cause());

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DetailNotFound(77))
    );
}

#[test]
fn test_summary_reports_allocation_totals() {
    let mut store = MemoryStore::new();
    seed_reference_participants(&mut store);
    let distribution_id = create_test_distribution(&mut store, 3_000_000);
    run_automatic_allocation(
        &mut store,
        distribution_id,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let summary = distribution_summary(&mut store, distribution_id).unwrap();

    assert_eq!(summary.details.len(), 2);
    assert!((summary.allocated_percentage() - 100.0).abs() < 1e-9);
    assert_eq!(summary.allocated_amount(), 3_000_000);
    assert_eq!(summary.residual(), 0);
    assert!(summary.to_snapshot().data.contains("allocated_percentage=100.00"));
}

#[test]
fn test_summary_of_unknown_distribution_is_not_found() {
    let mut store = MemoryStore::new();

    assert_eq!(
        distribution_summary(&mut store, 12).unwrap_err(),
        CoreError::DomainViolation(DomainError::DistributionNotFound(12))
    );
}
