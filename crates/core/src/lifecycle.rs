// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Distribution lifecycle operations.
//!
//! Each operation validates its preconditions, performs its writes
//! through the `DistributionStore`, and returns the result together with
//! an audit event.
//!
//! ## Invariants
//!
//! - A distribution is `Distributed` only while its detail rows sum to
//!   100% within `PERCENTAGE_TOLERANCE`
//! - At most one detail row exists per participant per distribution
//! - Every stored amount equals `compute_amount(total_profit, percentage)`
//!   for the stored percentage of its row
//! - Validation happens before the first write, so a rejected operation
//!   leaves storage untouched
//!
//! Callers must run each operation inside a single storage transaction
//! so that a failing write rolls back the writes before it.

use crate::error::CoreError;
use crate::state::{DistributionSummary, Transition};
use crate::store::{DistributionStore, StoreError};
use profit_share_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use profit_share_domain::{
    Allocation, Distribution, DistributionDetail, DistributionState, DomainError,
    ParticipantStanding, allocation_residual, compute_allocations, compute_amount,
    is_fully_allocated, total_percentage, validate_allocation_capacity,
    validate_participant_unallocated, validate_percentage, validate_period,
    validate_total_profit,
};
use time::Date;

/// Loads a distribution, mapping a missing row to `DistributionNotFound`.
fn load_distribution<S: DistributionStore>(
    store: &mut S,
    distribution_id: i64,
) -> Result<Distribution, CoreError> {
    store
        .get_distribution(distribution_id)?
        .ok_or(CoreError::DomainViolation(
            DomainError::DistributionNotFound(distribution_id),
        ))
}

/// Returns the persisted ID of a distribution returned by the store.
fn persisted_distribution_id(distribution: &Distribution) -> Result<i64, CoreError> {
    distribution.distribution_id().ok_or_else(|| {
        CoreError::Store(StoreError::WriteFailed(String::from(
            "stored distribution has no identifier",
        )))
    })
}

fn audit_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    distribution_id: i64,
) -> AuditEvent {
    AuditEvent::new(actor, cause, action, before, after, Some(distribution_id))
}

/// Loads a distribution and its detail rows.
///
/// # Errors
///
/// Returns an error if the distribution does not exist or the store fails.
pub fn distribution_summary<S: DistributionStore>(
    store: &mut S,
    distribution_id: i64,
) -> Result<DistributionSummary, CoreError> {
    let distribution: Distribution = load_distribution(store, distribution_id)?;
    let details: Vec<DistributionDetail> = store.list_distribution_details(distribution_id)?;
    Ok(DistributionSummary::new(distribution, details))
}

/// Declares a new distribution in the `Pending` state.
///
/// Duplicate period labels are not rejected here; detecting them is the
/// caller's concern.
///
/// # Errors
///
/// Returns an error if:
/// - The period label is blank or too long
/// - `total_profit` is zero or negative
/// - The store fails
pub fn create_distribution<S: DistributionStore>(
    store: &mut S,
    period: &str,
    distribution_date: Date,
    total_profit: i64,
    actor: Actor,
    cause: Cause,
) -> Result<Transition<Distribution>, CoreError> {
    validate_period(period)?;
    validate_total_profit(total_profit)?;

    let created: Distribution =
        store.insert_distribution(&Distribution::new(period, distribution_date, total_profit))?;
    let distribution_id: i64 = persisted_distribution_id(&created)?;

    let before: StateSnapshot = StateSnapshot::new(String::from("distribution=none"));
    let after: StateSnapshot = DistributionSummary::new(created.clone(), Vec::new()).to_snapshot();
    let action: Action = Action::new(
        String::from("CreateDistribution"),
        Some(format!(
            "Created distribution '{}' dated {} with total profit {}",
            created.period(),
            created.distribution_date(),
            created.total_profit()
        )),
    );

    Ok(Transition {
        value: created,
        audit_event: audit_event(actor, cause, action, before, after, distribution_id),
    })
}

/// Adds one manually entered detail row.
///
/// The amount is derived from the distribution's total profit. If the
/// distribution reaches 100% (within tolerance) it becomes `Distributed`.
///
/// # Errors
///
/// Returns an error if:
/// - `percentage` is outside `(0, 100]`
/// - The distribution or participant does not exist
/// - The participant already has a row in this distribution
/// - The new row would push the distribution past 100%
/// - The store fails
pub fn add_manual_detail<S: DistributionStore>(
    store: &mut S,
    distribution_id: i64,
    participant_id: i64,
    percentage: f64,
    actor: Actor,
    cause: Cause,
) -> Result<Transition<DistributionDetail>, CoreError> {
    validate_percentage(percentage)?;

    let summary: DistributionSummary = distribution_summary(store, distribution_id)?;

    if store.get_participant(participant_id)?.is_none() {
        return Err(CoreError::DomainViolation(
            DomainError::ParticipantNotFound(participant_id),
        ));
    }

    validate_participant_unallocated(distribution_id, participant_id, &summary.details)?;

    let allocated: f64 = summary.allocated_percentage();
    validate_allocation_capacity(distribution_id, allocated, percentage)?;

    let amount: i64 = compute_amount(summary.distribution.total_profit(), percentage)?;

    let before: StateSnapshot = summary.to_snapshot();

    let inserted: DistributionDetail = store.insert_distribution_detail(
        &DistributionDetail::new(distribution_id, participant_id, percentage, amount),
    )?;

    let new_state: DistributionState = if is_fully_allocated(allocated + percentage) {
        DistributionState::Distributed
    } else {
        DistributionState::Pending
    };
    if new_state != summary.distribution.state() {
        store.update_distribution_state(distribution_id, new_state)?;
    }

    let mut details: Vec<DistributionDetail> = summary.details;
    details.push(inserted.clone());
    let after: StateSnapshot =
        DistributionSummary::new(summary.distribution.with_state(new_state), details).to_snapshot();

    let action: Action = Action::new(
        String::from("AddManualDetail"),
        Some(format!(
            "Allocated {percentage}% ({amount}) to participant {participant_id}"
        )),
    );

    Ok(Transition {
        value: inserted,
        audit_event: audit_event(actor, cause, action, before, after, distribution_id),
    })
}

/// Recomputes every detail row of a distribution from current
/// participant and role data.
///
/// This is a full replace: existing rows are discarded, including manual
/// entries. Inactive participants are not filtered out. Participants with
/// zero weight, or a share that rounds below 0.01%, receive no row. The
/// stored percentages sum to 100, so on success the distribution is
/// `Distributed`.
///
/// The allocation is computed before anything is written, so a
/// distribution with no eligible participants keeps its existing rows.
///
/// # Errors
///
/// Returns an error if:
/// - The distribution does not exist
/// - The distribution's total profit is not positive
/// - Participant data is invalid (negative investment or importance)
/// - No participant has a positive weight
/// - The store fails
pub fn run_automatic_allocation<S: DistributionStore>(
    store: &mut S,
    distribution_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<Transition<Vec<DistributionDetail>>, CoreError> {
    let summary: DistributionSummary = distribution_summary(store, distribution_id)?;
    let total_profit: i64 = summary.distribution.total_profit();

    if total_profit <= 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidState {
            distribution_id,
            state: summary.distribution.state(),
            reason: format!("total profit {total_profit} is not positive"),
        }));
    }

    let standings: Vec<ParticipantStanding> = store.list_participants_with_roles()?;
    let allocations: Vec<Allocation> = compute_allocations(total_profit, &standings)?;
    let residual: i64 = allocation_residual(total_profit, &allocations);

    let rows: Vec<DistributionDetail> = allocations
        .iter()
        .map(|a| DistributionDetail::new(distribution_id, a.participant_id, a.percentage, a.amount))
        .collect();

    let before: StateSnapshot = summary.to_snapshot();

    let state: DistributionState = if is_fully_allocated(total_percentage(&rows)) {
        DistributionState::Distributed
    } else {
        DistributionState::Pending
    };

    let inserted: Vec<DistributionDetail> =
        store.replace_distribution_details(distribution_id, &rows)?;
    store.update_distribution_state(distribution_id, state)?;

    let after: StateSnapshot =
        DistributionSummary::new(summary.distribution.with_state(state), inserted.clone())
            .to_snapshot();

    let action: Action = Action::new(
        String::from("RunAutomaticAllocation"),
        Some(format!(
            "Replaced {} detail rows with {} weighted allocations ({} participants considered, residual {residual})",
            summary.details.len(),
            inserted.len(),
            standings.len()
        )),
    );

    Ok(Transition {
        value: inserted,
        audit_event: audit_event(actor, cause, action, before, after, distribution_id),
    })
}

/// Removes one detail row.
///
/// If the remaining rows no longer reach 100% (within tolerance), the
/// distribution reverts to `Pending`.
///
/// # Errors
///
/// Returns an error if the detail does not exist or the store fails.
pub fn remove_detail<S: DistributionStore>(
    store: &mut S,
    detail_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<Transition<DistributionDetail>, CoreError> {
    let detail: DistributionDetail = store
        .get_distribution_detail(detail_id)?
        .ok_or(CoreError::DomainViolation(DomainError::DetailNotFound(
            detail_id,
        )))?;
    let distribution_id: i64 = detail.distribution_id();
    let summary: DistributionSummary = distribution_summary(store, distribution_id)?;

    let before: StateSnapshot = summary.to_snapshot();

    store.delete_distribution_detail(detail_id)?;

    let remaining: Vec<DistributionDetail> = summary
        .details
        .into_iter()
        .filter(|d| d.detail_id() != Some(detail_id))
        .collect();

    let mut state: DistributionState = summary.distribution.state();
    if state == DistributionState::Distributed && !is_fully_allocated(total_percentage(&remaining))
    {
        state = DistributionState::Pending;
        store.update_distribution_state(distribution_id, state)?;
    }

    let after: StateSnapshot =
        DistributionSummary::new(summary.distribution.with_state(state), remaining).to_snapshot();

    let action: Action = Action::new(
        String::from("RemoveDetail"),
        Some(format!(
            "Removed {}% ({}) from participant {}",
            detail.percentage(),
            detail.amount(),
            detail.participant_id()
        )),
    );

    Ok(Transition {
        value: detail,
        audit_event: audit_event(actor, cause, action, before, after, distribution_id),
    })
}

/// Corrects a distribution's total profit.
///
/// Every existing detail row keeps its percentage and has its amount
/// recomputed against the new total. The state does not change.
///
/// # Errors
///
/// Returns an error if:
/// - `total_profit` is zero or negative
/// - The distribution does not exist
/// - The store fails
pub fn update_total_profit<S: DistributionStore>(
    store: &mut S,
    distribution_id: i64,
    total_profit: i64,
    actor: Actor,
    cause: Cause,
) -> Result<Transition<DistributionSummary>, CoreError> {
    validate_total_profit(total_profit)?;

    let summary: DistributionSummary = distribution_summary(store, distribution_id)?;
    let before: StateSnapshot = summary.to_snapshot();
    let previous_total: i64 = summary.distribution.total_profit();

    let mut amounts: Vec<(i64, i64)> = Vec::with_capacity(summary.details.len());
    let mut details: Vec<DistributionDetail> = Vec::with_capacity(summary.details.len());
    for detail in &summary.details {
        let amount: i64 = compute_amount(total_profit, detail.percentage())?;
        if let Some(detail_id) = detail.detail_id() {
            amounts.push((detail_id, amount));
            details.push(DistributionDetail::with_id(
                detail_id,
                distribution_id,
                detail.participant_id(),
                detail.percentage(),
                amount,
            ));
        }
    }

    store.update_distribution_total_profit(distribution_id, total_profit)?;
    store.update_detail_amounts(&amounts)?;

    let updated: DistributionSummary =
        DistributionSummary::new(summary.distribution.with_total_profit(total_profit), details);
    let after: StateSnapshot = updated.to_snapshot();

    let action: Action = Action::new(
        String::from("UpdateTotalProfit"),
        Some(format!(
            "Changed total profit from {previous_total} to {total_profit}; recomputed {} amounts",
            amounts.len()
        )),
    );

    Ok(Transition {
        value: updated,
        audit_event: audit_event(actor, cause, action, before, after, distribution_id),
    })
}
