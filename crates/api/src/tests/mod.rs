// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]


use crate::{CreateDistributionRequest, create_distribution};
use profit_share_audit::{Actor, Cause};
use profit_share_persistence::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("api-operator"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API test"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Seeds the three-participant reference scenario and returns `(a, b, c)`.
///
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

pub fn create_test_distribution(persistence: &mut Persistence, total_profit: i64) -> i64 {
    let request = CreateDistributionRequest {
        period: String::from("2026-Q1"),
        distribution_date: String::from("2026-03-31"),
        total_profit,
    };
    create_distribution(
        persistence,
        &request,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .distribution
    .distribution_id
}
