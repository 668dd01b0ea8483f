// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DistributionStore, StoreError, Transition, create_distribution};
use profit_share_audit::{Actor, Cause};
use profit_share_domain::{
    Distribution, DistributionDetail, DistributionState, Participant, ParticipantStanding, Role,
};
use std::collections::BTreeMap;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Quarter close"))
}

/// In-memory `DistributionStore` used to exercise the lifecycle in isolation.
///
/// Writes only mutate state once they are known to succeed, so a failed
/// write never leaves partial changes behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roles: BTreeMap<i64, Role>,
    participants: BTreeMap<i64, Participant>,
    distributions: BTreeMap<i64, Distribution>,
    details: BTreeMap<i64, DistributionDetail>,
    next_id: i64,
    /// When set, `replace_distribution_details` fails.
    pub fail_replace: bool,
    /// When set, `insert_distribution_detail` fails.
    pub fail_insert_detail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_role(&mut self, name: &str, importance: f64) -> i64 {
        let id = self.allocate_id();
        self.roles.insert(id, Role::with_id(id, name, importance));
        id
    }

    pub fn add_participant(
        &mut self,
        name: &str,
        investment_total: f64,
        role_id: Option<i64>,
        active: bool,
    ) -> i64 {
        let id = self.allocate_id();
        self.participants.insert(
            id,
            Participant::with_id(id, name, investment_total, role_id, active),
        );
        id
    }

    pub fn set_investment(&mut self, participant_id: i64, investment_total: f64) {
        let current = self.participants[&participant_id].clone();
        self.participants.insert(
            participant_id,
            Participant::with_id(
                participant_id,
                current.name(),
                investment_total,
                current.role_id(),
                current.is_active(),
            ),
        );
    }

    pub fn details_for(&self, distribution_id: i64) -> Vec<DistributionDetail> {
        self.details
            .values()
            .filter(|d| d.distribution_id() == distribution_id)
            .cloned()
            .collect()
    }

    pub fn state_of(&self, distribution_id: i64) -> DistributionState {
        self.distributions[&distribution_id].state()
    }

    pub fn total_profit_of(&self, distribution_id: i64) -> i64 {
        self.distributions[&distribution_id].total_profit()
    }
}

impl DistributionStore for MemoryStore {
    fn get_distribution(
        &mut self,
        distribution_id: i64,
    ) -> Result<Option<Distribution>, StoreError> {
        Ok(self.distributions.get(&distribution_id).cloned())
    }

    fn list_participants_with_roles(&mut self) -> Result<Vec<ParticipantStanding>, StoreError> {
        Ok(self
            .participants
            .values()
            .map(|p| {
                let importance = p
                    .role_id()
                    .and_then(|role_id| self.roles.get(&role_id))
                    .map(Role::importance);
                ParticipantStanding::new(
                    p.participant_id().unwrap(),
                    p.investment_total(),
                    importance,
                    p.is_active(),
                )
            })
            .collect())
    }

    fn get_participant(&mut self, participant_id: i64) -> Result<Option<Participant>, StoreError> {
        Ok(self.participants.get(&participant_id).cloned())
    }

    fn list_distribution_details(
        &mut self,
        distribution_id: i64,
    ) -> Result<Vec<DistributionDetail>, StoreError> {
        Ok(self.details_for(distribution_id))
    }

    fn get_distribution_detail(
        &mut self,
        detail_id: i64,
    ) -> Result<Option<DistributionDetail>, StoreError> {
        Ok(self.details.get(&detail_id).cloned())
    }

    fn insert_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<Distribution, StoreError> {
        let id = self.allocate_id();
        let stored = Distribution::with_id(
            id,
            distribution.period(),
            distribution.distribution_date(),
            distribution.total_profit(),
            distribution.state(),
        );
        self.distributions.insert(id, stored.clone());
        Ok(stored)
    }

    fn insert_distribution_detail(
        &mut self,
        detail: &DistributionDetail,
    ) -> Result<DistributionDetail, StoreError> {
        if self.fail_insert_detail {
            return Err(StoreError::WriteFailed(String::from("insert refused")));
        }
        let id = self.allocate_id();
        let stored = DistributionDetail::with_id(
            id,
            detail.distribution_id(),
            detail.participant_id(),
            detail.percentage(),
            detail.amount(),
        );
        self.details.insert(id, stored.clone());
        Ok(stored)
    }

    fn replace_distribution_details(
        &mut self,
        distribution_id: i64,
        details: &[DistributionDetail],
    ) -> Result<Vec<DistributionDetail>, StoreError> {
        if self.fail_replace {
            return Err(StoreError::WriteFailed(String::from("replace refused")));
        }
        self.details
            .retain(|_, d| d.distribution_id() != distribution_id);
        let mut inserted = Vec::with_capacity(details.len());
        for detail in details {
            inserted.push(self.insert_distribution_detail(detail)?);
        }
        Ok(inserted)
    }

    fn delete_distribution_detail(&mut self, detail_id: i64) -> Result<(), StoreError> {
        self.details.remove(&detail_id);
        Ok(())
    }

    fn update_distribution_state(
        &mut self,
        distribution_id: i64,
        state: DistributionState,
    ) -> Result<(), StoreError> {
        let current = self.distributions[&distribution_id].clone();
        self.distributions
            .insert(distribution_id, current.with_state(state));
        Ok(())
    }

    fn update_distribution_total_profit(
        &mut self,
        distribution_id: i64,
        total_profit: i64,
    ) -> Result<(), StoreError> {
        let current = self.distributions[&distribution_id].clone();
        self.distributions
            .insert(distribution_id, current.with_total_profit(total_profit));
        Ok(())
    }

    fn update_detail_amounts(&mut self, amounts: &[(i64, i64)]) -> Result<(), StoreError> {
        for &(detail_id, amount) in amounts {
            let current = self.details[&detail_id].clone();
            self.details.insert(
                detail_id,
                DistributionDetail::with_id(
                    detail_id,
                    current.distribution_id(),
                    current.participant_id(),
                    current.percentage(),
                    amount,
                ),
            );
        }
        Ok(())
    }
}

/// Creates a distribution and returns its ID.
pub fn create_test_distribution(store: &mut MemoryStore, total_profit: i64) -> i64 {
    let transition: Transition<Distribution> = create_distribution(
        store,
        "2026-Q1",
        date!(2026 - 03 - 31),
        total_profit,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    transition.value.distribution_id().unwrap()
}

/// Seeds the three-participant reference scenario and returns their IDs.
///
/// - A: 1,000,000 invested, role importance 50
/// - B: 2,000,000 invested, role importance 0
/// - C: nothing invested, role importance 100
pub fn seed_reference_participants(store: &mut MemoryStore) -> (i64, i64, i64) {
    let partner = store.add_role("Partner", 50.0);
    let associate = store.add_role("Associate", 0.0);
    let founder = store.add_role("Founder", 100.0);

    let a = store.add_participant("A", 1_000_000.0, Some(partner), true);
    let b = store.add_participant("B", 2_000_000.0, Some(associate), true);
    let c = store.add_participant("C", 0.0, Some(founder), true);
    (a, b, c)
}
