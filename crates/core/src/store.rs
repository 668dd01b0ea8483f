// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence collaborator consumed by the lifecycle manager.
//!
//! Implementations own storage of distributions, detail rows and the
//! read-only participant/role data. Every method takes `&mut self`, so a
//! caller holding the store has exclusive access for the duration of an
//! operation.

use profit_share_domain::{
    Distribution, DistributionDetail, DistributionState, Participant, ParticipantStanding,
};

/// Failures reported by a `DistributionStore` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A read failed.
    QueryFailed(String),
    /// A write failed.
    WriteFailed(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::WriteFailed(msg) => write!(f, "Write failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage operations required by the distribution lifecycle.
pub trait DistributionStore {
    /// Loads a distribution by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_distribution(&mut self, distribution_id: i64)
    -> Result<Option<Distribution>, StoreError>;

    /// Lists every participant joined with its role importance.
    ///
    /// Inactive participants are included; the `active` flag is carried
    /// on each standing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_participants_with_roles(&mut self) -> Result<Vec<ParticipantStanding>, StoreError>;

    /// Loads a participant by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_participant(&mut self, participant_id: i64) -> Result<Option<Participant>, StoreError>;

    /// Lists the detail rows of a distribution in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_distribution_details(
        &mut self,
        distribution_id: i64,
    ) -> Result<Vec<DistributionDetail>, StoreError>;

    /// Loads a detail row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_distribution_detail(
        &mut self,
        detail_id: i64,
    ) -> Result<Option<DistributionDetail>, StoreError>;

    /// Inserts a distribution and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<Distribution, StoreError>;

    /// Inserts one detail row and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_distribution_detail(
        &mut self,
        detail: &DistributionDetail,
    ) -> Result<DistributionDetail, StoreError>;

    /// Atomically deletes every detail row of a distribution and inserts
    /// `details` in their place.
    ///
    /// Either all rows are replaced or none are.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; existing rows are then kept.
    fn replace_distribution_details(
        &mut self,
        distribution_id: i64,
        details: &[DistributionDetail],
    ) -> Result<Vec<DistributionDetail>, StoreError>;

    /// Deletes a detail row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_distribution_detail(&mut self, detail_id: i64) -> Result<(), StoreError>;

    /// Sets a distribution's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_distribution_state(
        &mut self,
        distribution_id: i64,
        state: DistributionState,
    ) -> Result<(), StoreError>;

    /// Sets a distribution's total profit.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_distribution_total_profit(
        &mut self,
        distribution_id: i64,
        total_profit: i64,
    ) -> Result<(), StoreError>;

    /// Sets the amount of each `(detail_id, amount)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_detail_amounts(&mut self, amounts: &[(i64, i64)]) -> Result<(), StoreError>;
}
