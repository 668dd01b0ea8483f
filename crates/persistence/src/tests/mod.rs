// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod bookkeeping_tests;
mod distribution_tests;

use crate::{Persistence, PersistenceError};
use profit_share::{Transition, create_distribution};
use profit_share_audit::{Actor, Cause};
use profit_share_domain::Distribution;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Seeds roles and participants matching the three-participant example.
///
/// Returns the participant IDs `(a, b, c)`:
/// - A: 1,000,000 invested, importance 50
/// - B: 2,000,000 invested, importance 0
/// - C: nothing invested, importance 100
pub fn seed_reference_participants(persistence: &mut Persistence) -> (i64, i64, i64) {
    let partner = persistence.create_role("Partner", 50.0).unwrap();
    let associate = persistence.create_role("Associate", 0.0).unwrap();
    let founder = persistence.create_role("Founder", 100.0).unwrap();

    let a = persistence
        .create_participant("A", 1_000_000.0, partner.role_id(), true)
        .unwrap();
    let b = persistence
        .create_participant("B", 2_000_000.0, associate.role_id(), true)
        .unwrap();
    let c = persistence
        .create_participant("C", 0.0, founder.role_id(), true)
        .unwrap();

    (
        a.participant_id().unwrap(),
        b.participant_id().unwrap(),
        c.participant_id().unwrap(),
    )
}

/// Creates a distribution through the lifecycle and persists its audit event.
pub fn create_test_distribution(persistence: &mut Persistence, total_profit: i64) -> i64 {
    persistence
        .with_transaction(|store| {
            let transition: Transition<Distribution> = create_distribution(
                store,
                "2026-Q1",
                date!(2026 - 03 - 31),
                total_profit,
                create_test_actor(),
                create_test_cause(),
            )?;
            store.persist_audit_event(&transition.audit_event)?;
            transition
                .value
                .distribution_id()
                .ok_or_else(|| PersistenceError::NotFound(String::from("distribution id")))
        })
        .unwrap()
}
