// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_actor, create_test_cause, create_test_distribution, seed_reference_participants,
};
use crate::{Persistence, PersistenceError};
use profit_share::{add_manual_detail, remove_detail, update_total_profit};
use profit_share_domain::DistributionState;
use time::macros::date;

#[test]
fn test_distribution_round_trips_through_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let distribution_id = create_test_distribution(&mut persistence, 3_000_000);

    let stored = persistence.get_distribution(distribution_id).unwrap();

    assert_eq!(stored.distribution_id(), Some(distribution_id));
    assert_eq!(stored.period(), "2026-Q1");
    assert_eq!(stored.distribution_date(), date!(2026 - 03 - 31));
    assert_eq!(stored.total_profit(), 3_000_000);
    assert_eq!(stored.state(), DistributionState::Pending);
}

#[test]
fn test_get_unknown_distribution_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence.get_distribution(5),
        Err(PersistenceError::DistributionNotFound(5))
    );
}

#[test]
fn test_find_distributions_by_period() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first = create_test_distribution(&mut persistence, 100);
    let second = create_test_distribution(&mut persistence, 200);

    let matches = persistence.find_distributions_by_period("2026-Q1").unwrap();
    let ids: Vec<Option<i64>> = matches.iter().map(|d| d.distribution_id()).collect();

    assert_eq!(ids, vec![Some(first), Some(second)]);
    assert!(
        persistence
            .find_distributions_by_period("2026-Q2")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_remove_detail_reverts_state_in_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (a, b, _) = seed_reference_participants(&mut persistence);
    let distribution_id = create_test_distribution(&mut persistence, 1_000);

    let first_id = persistence
        .with_transaction(|store| {
            let first = add_manual_detail(
                store,
                distribution_id,
                a,
                70.0,
                create_test_actor(),
                create_test_cause(),
            )?;
            add_manual_detail(
                store,
                distribution_id,
                b,
                30.0,
                create_test_actor(),
                create_test_cause(),
            )?;
            Ok(first.value.detail_id())
        })
        .unwrap()
        .unwrap();
    assert_eq!(
        persistence.get_distribution(distribution_id).unwrap().state(),
        DistributionState::Distributed
    );

    persistence
        .with_transaction(|store| {
            remove_detail(store, first_id, create_test_actor(), create_test_cause())?;
            Ok(())
        })
        .unwrap();

    assert_eq!(
        persistence.get_distribution(distribution_id).unwrap().state(),
        DistributionState::Pending
    );
    assert_eq!(
        persistence
            .list_distribution_details(distribution_id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_update_total_profit_rewrites_amounts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (a, _, _) = seed_reference_participants(&mut persistence);
    let distribution_id = create_test_distribution(&mut persistence, 1_000);
    persistence
        .with_transaction(|store| {
            add_manual_detail(
                store,
                distribution_id,
                a,
                33.33,
                create_test_actor(),
                create_test_cause(),
            )?;
            update_total_profit(
                store,
                distribution_id,
                10_000,
                create_test_actor(),
                create_test_cause(),
            )?;
            Ok(())
        })
        .unwrap();

    let details = persistence.list_distribution_details(distribution_id).unwrap();
    assert_eq!(details[0].amount(), 3_333);
    assert_eq!(
        persistence.get_distribution(distribution_id).unwrap().total_profit(),
        10_000
    );
}

#[test]
fn test_delete_distribution_cascades_to_details() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (a, _, _) = seed_reference_participants(&mut persistence);
    let distribution_id = create_test_distribution(&mut persistence, 1_000);
    persistence
        .with_transaction(|store| {
            add_manual_detail(
                store,
                distribution_id,
                a,
                10.0,
                create_test_actor(),
                create_test_cause(),
            )?;
            Ok(())
        })
        .unwrap();

    persistence.delete_distribution(distribution_id).unwrap();

    assert!(persistence.list_distributions().unwrap().is_empty());
    assert!(
        persistence
            .list_distribution_details(distribution_id)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        persistence.delete_distribution(distribution_id),
        Err(PersistenceError::DistributionNotFound(distribution_id))
    );
}
