// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Diesel-backed `DistributionStore`.

use diesel::SqliteConnection;
use profit_share::{DistributionStore, StoreError};
use profit_share_audit::AuditEvent;
use profit_share_domain::{
    Distribution, DistributionDetail, DistributionState, Participant, ParticipantStanding,
};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// A `DistributionStore` bound to one open transaction.
///
/// Obtained from `Persistence::with_transaction`; every write made through
/// it commits or rolls back with that transaction.
pub struct SqliteStore<'conn> {
    conn: &'conn mut SqliteConnection,
}

impl<'conn> SqliteStore<'conn> {
    pub(crate) const fn new(conn: &'conn mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Persists an audit event in the current transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(self.conn, event)
    }

    /// Finds distributions with the given period label.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_distributions_by_period(
        &mut self,
        period: &str,
    ) -> Result<Vec<Distribution>, PersistenceError> {
        queries::distributions::find_distributions_by_period(self.conn, period)
    }
}

fn read_failure(err: PersistenceError) -> StoreError {
    StoreError::QueryFailed(err.to_string())
}

fn write_failure(err: PersistenceError) -> StoreError {
    StoreError::WriteFailed(err.to_string())
}

impl DistributionStore for SqliteStore<'_> {
    fn get_distribution(
        &mut self,
        distribution_id: i64,
    ) -> Result<Option<Distribution>, StoreError> {
        queries::distributions::get_distribution(self.conn, distribution_id).map_err(read_failure)
    }

    fn list_participants_with_roles(&mut self) -> Result<Vec<ParticipantStanding>, StoreError> {
        queries::participants::list_participants_with_roles(self.conn).map_err(read_failure)
    }

    fn get_participant(&mut self, participant_id: i64) -> Result<Option<Participant>, StoreError> {
        queries::participants::get_participant(self.conn, participant_id).map_err(read_failure)
    }

    fn list_distribution_details(
        &mut self,
        distribution_id: i64,
    ) -> Result<Vec<DistributionDetail>, StoreError> {
        queries::distributions::list_distribution_details(self.conn, distribution_id)
            .map_err(read_failure)
    }

    fn get_distribution_detail(
        &mut self,
        detail_id: i64,
    ) -> Result<Option<DistributionDetail>, StoreError> {
        queries::distributions::get_distribution_detail(self.conn, detail_id).map_err(read_failure)
    }

    fn insert_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<Distribution, StoreError> {
        mutations::distributions::insert_distribution(self.conn, distribution)
            .map_err(write_failure)
    }

    fn insert_distribution_detail(
        &mut self,
        detail: &DistributionDetail,
    ) -> Result<DistributionDetail, StoreError> {
        mutations::distributions::insert_distribution_detail(self.conn, detail)
            .map_err(write_failure)
    }

    fn replace_distribution_details(
        &mut self,
        distribution_id: i64,
        details: &[DistributionDetail],
    ) -> Result<Vec<DistributionDetail>, StoreError> {
        mutations::distributions::replace_distribution_details(self.conn, distribution_id, details)
            .map_err(write_failure)
    }

    fn delete_distribution_detail(&mut self, detail_id: i64) -> Result<(), StoreError> {
        mutations::distributions::delete_distribution_detail(self.conn, detail_id)
            .map_err(write_failure)
    }

    fn update_distribution_state(
        &mut self,
        distribution_id: i64,
        state: DistributionState,
    ) -> Result<(), StoreError> {
        mutations::distributions::update_distribution_state(self.conn, distribution_id, state)
            .map_err(write_failure)
    }

    fn update_distribution_total_profit(
        &mut self,
        distribution_id: i64,
        total_profit: i64,
    ) -> Result<(), StoreError> {
        mutations::distributions::update_distribution_total_profit(
            self.conn,
            distribution_id,
            total_profit,
        )
        .map_err(write_failure)
    }

    fn update_detail_amounts(&mut self, amounts: &[(i64, i64)]) -> Result<(), StoreError> {
        mutations::distributions::update_detail_amounts(self.conn, amounts).map_err(write_failure)
    }
}
