// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the profit distribution engine.
//!
//! This crate stores roles, participants, distributions, detail rows and
//! the audit trail in `SQLite` via Diesel, and provides the
//! `DistributionStore` implementation the lifecycle operations run
//! against.
//!
//! ## Transactions
//!
//! Lifecycle operations run through `Persistence::with_transaction`. The
//! closure receives a `SqliteStore` bound to one transaction; returning an
//! error rolls back every write made through it, including the audit
//! event.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller its own shared
//! in-memory database, so tests are isolated without touching disk.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use profit_share_audit::AuditEvent;
use profit_share_domain::{Distribution, DistributionDetail, Participant, Role};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::SqliteStore;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning the database connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Runs `operation` inside a single database transaction.
    ///
    /// The transaction commits if `operation` returns `Ok` and rolls back
    /// otherwise. Lifecycle errors surface as `PersistenceError::Core`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `operation`, or a database error if
    /// the transaction cannot be started or committed.
    pub fn with_transaction<T, F>(&mut self, operation: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteStore<'_>) -> Result<T, PersistenceError>,
    {
        self.conn.transaction(|conn| {
            let mut store: SqliteStore<'_> = SqliteStore::new(conn);
            operation(&mut store)
        })
    }

    // ========================================================================
    // Roles & Participants
    // ========================================================================

    /// Creates a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the importance is negative or the insert fails.
    pub fn create_role(&mut self, name: &str, importance: f64) -> Result<Role, PersistenceError> {
        let role_id: i64 = mutations::participants::insert_role(&mut self.conn, name, importance)?;
        info!(role_id, name, importance, "Created role");
        Ok(Role::with_id(role_id, name, importance))
    }

    /// Creates a participant.
    ///
    /// # Errors
    ///
    /// Returns an error if the role does not exist, the investment is
    /// negative, or the insert fails.
    pub fn create_participant(
        &mut self,
        name: &str,
        investment_total: f64,
        role_id: Option<i64>,
        active: bool,
    ) -> Result<Participant, PersistenceError> {
        if let Some(id) = role_id
            && queries::participants::get_role(&mut self.conn, id)?.is_none()
        {
            return Err(PersistenceError::RoleNotFound(id));
        }

        let participant_id: i64 = mutations::participants::insert_participant(
            &mut self.conn,
            name,
            investment_total,
            role_id,
            active,
        )?;
        info!(participant_id, name, "Created participant");
        Ok(Participant::with_id(
            participant_id,
            name,
            investment_total,
            role_id,
            active,
        ))
    }

    /// Sets a participant's accumulated investment.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant does not exist or the update fails.
    pub fn update_participant_investment(
        &mut self,
        participant_id: i64,
        investment_total: f64,
    ) -> Result<(), PersistenceError> {
        mutations::participants::update_participant_investment(
            &mut self.conn,
            participant_id,
            investment_total,
        )
    }

    /// Marks a participant active or inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant does not exist or the update fails.
    pub fn set_participant_active(
        &mut self,
        participant_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::participants::set_participant_active(&mut self.conn, participant_id, active)
    }

    /// Lists every participant ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_participants(&mut self) -> Result<Vec<Participant>, PersistenceError> {
        queries::participants::list_participants(&mut self.conn)
    }

    // ========================================================================
    // Distributions
    // ========================================================================

    /// Lists every distribution, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_distributions(&mut self) -> Result<Vec<Distribution>, PersistenceError> {
        queries::distributions::list_distributions(&mut self.conn)
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
        queries::distributions::find_distributions_by_period(&mut self.conn, period)
    }

    /// Loads a distribution by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the distribution does not exist or the query fails.
    pub fn get_distribution(&mut self, distribution_id: i64) -> Result<Distribution, PersistenceError> {
        queries::distributions::get_distribution(&mut self.conn, distribution_id)?
            .ok_or(PersistenceError::DistributionNotFound(distribution_id))
    }

    /// Lists the detail rows of a distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_distribution_details(
        &mut self,
        distribution_id: i64,
    ) -> Result<Vec<DistributionDetail>, PersistenceError> {
        queries::distributions::list_distribution_details(&mut self.conn, distribution_id)
    }

    /// Deletes a distribution together with its detail rows.
    ///
    /// Audit events referring to it are kept with their reference cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the distribution does not exist or the delete fails.
    pub fn delete_distribution(&mut self, distribution_id: i64) -> Result<(), PersistenceError> {
        mutations::distributions::delete_distribution(&mut self.conn, distribution_id)?;
        info!(distribution_id, "Deleted distribution");
        Ok(())
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists an audit event outside of any lifecycle transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit trail of a distribution, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_events_for_distribution(
        &mut self,
        distribution_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_events_for_distribution(&mut self.conn, distribution_id)
    }
}
