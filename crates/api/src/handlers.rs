// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each write handler runs its lifecycle operation and stores the
//! resulting audit event in one transaction, so either both land or
//! neither does.

use profit_share::{DistributionSummary, Transition};
use profit_share_audit::{Actor, AuditEvent, Cause};
use profit_share_domain::{Distribution, DistributionDetail};
use profit_share_persistence::Persistence;
use time::Date;
use tracing::{info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    AddManualDetailRequest, AddManualDetailResponse, AuditEventInfo, AuditTrailResponse,
    CreateDistributionRequest, CreateDistributionResponse, DetailInfo, DistributionInfo,
    DistributionSummaryResponse, ListDistributionsResponse, RemoveDetailRequest,
    RemoveDetailResponse, RunAutomaticAllocationRequest, RunAutomaticAllocationResponse,
    UpdateTotalProfitRequest, UpdateTotalProfitResponse,
};

/// Parses a `YYYY-MM-DD` date supplied for `field`.
fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, &time::format_description::well_known::Iso8601::DEFAULT).map_err(|_| {
        ApiError::InvalidInput {
            field: String::from(field),
            message: format!("Invalid date format: {value}"),
        }
    })
}

fn missing_id(entity: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Stored {entity} has no identifier"),
    }
}

fn distribution_info(distribution: &Distribution) -> Result<DistributionInfo, ApiError> {
    Ok(DistributionInfo {
        distribution_id: distribution
            .distribution_id()
            .ok_or_else(|| missing_id("distribution"))?,
        period: distribution.period().to_string(),
        distribution_date: distribution.distribution_date().to_string(),
        total_profit: distribution.total_profit(),
        state: distribution.state().to_string(),
    })
}

fn detail_info(detail: &DistributionDetail) -> Result<DetailInfo, ApiError> {
    Ok(DetailInfo {
        detail_id: detail.detail_id().ok_or_else(|| missing_id("detail"))?,
        distribution_id: detail.distribution_id(),
        participant_id: detail.participant_id(),
        percentage: detail.percentage(),
        amount: detail.amount(),
    })
}

fn detail_infos(details: &[DistributionDetail]) -> Result<Vec<DetailInfo>, ApiError> {
    details.iter().map(detail_info).collect()
}

fn summary_response(summary: &DistributionSummary) -> Result<DistributionSummaryResponse, ApiError> {
    Ok(DistributionSummaryResponse {
        distribution: distribution_info(&summary.distribution)?,
        details: detail_infos(&summary.details)?,
        allocated_percentage: summary.allocated_percentage(),
        allocated_amount: summary.allocated_amount(),
        residual: summary.residual(),
    })
}

fn audit_event_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: event.event_id.ok_or_else(|| missing_id("audit event"))?,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
    })
}

/// Declares a new distribution.
///
/// Reusing a period label is allowed; the response flags it and a
/// warning is logged.
///
/// # Errors
///
/// Returns an error if:
/// - The date is not `YYYY-MM-DD`
/// - The period or total profit is invalid
/// - Persistence fails
pub fn create_distribution(
    persistence: &mut Persistence,
    request: &CreateDistributionRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateDistributionResponse, ApiError> {
    let distribution_date: Date = parse_date("distribution_date", &request.distribution_date)?;

    let (distribution, event_id, duplicate_period) = persistence
        .with_transaction(|store| {
            let duplicate_period: bool = !store
                .find_distributions_by_period(&request.period)?
                .is_empty();
            let transition: Transition<Distribution> = profit_share::create_distribution(
                store,
                &request.period,
                distribution_date,
                request.total_profit,
                actor,
                cause,
            )?;
            let event_id: i64 = store.persist_audit_event(&transition.audit_event)?;
            Ok((transition.value, event_id, duplicate_period))
        })
        .map_err(translate_persistence_error)?;

    let info: DistributionInfo = distribution_info(&distribution)?;
    if duplicate_period {
        warn!(
            distribution_id = info.distribution_id,
            period = %info.period,
            "Period label already used by another distribution"
        );
    }
    info!(
        distribution_id = info.distribution_id,
        event_id,
        total_profit = info.total_profit,
        "Created distribution"
    );

    Ok(CreateDistributionResponse {
        message: format!("Created distribution for period '{}'", info.period),
        distribution: info,
        event_id,
        duplicate_period,
    })
}

/// Adds one manually entered detail row.
///
/// # Errors
///
/// Returns an error if the percentage is invalid, the distribution or
/// participant does not exist, the participant already has a row, the
/// entry would exceed 100%, or persistence fails.
pub fn add_manual_detail(
    persistence: &mut Persistence,
    request: &AddManualDetailRequest,
    actor: Actor,
    cause: Cause,
) -> Result<AddManualDetailResponse, ApiError> {
    let (detail, distribution_state, event_id) = persistence
        .with_transaction(|store| {
            let transition: Transition<DistributionDetail> = profit_share::add_manual_detail(
                store,
                request.distribution_id,
                request.participant_id,
                request.percentage,
                actor,
                cause,
            )?;
            let event_id: i64 = store.persist_audit_event(&transition.audit_event)?;
            let state: String = profit_share::distribution_summary(store, request.distribution_id)?
                .distribution
                .state()
                .to_string();
            Ok((transition.value, state, event_id))
        })
        .map_err(translate_persistence_error)?;

    info!(
        distribution_id = request.distribution_id,
        participant_id = request.participant_id,
        percentage = request.percentage,
        amount = detail.amount(),
        event_id,
        "Added manual distribution detail"
    );

    Ok(AddManualDetailResponse {
        detail: detail_info(&detail)?,
        message: format!(
            "Allocated {}% to participant {}",
            request.percentage, request.participant_id
        ),
        distribution_state,
        event_id,
    })
}

/// Recomputes every detail row of a distribution from participant weights.
///
/// # Errors
///
/// Returns an error if the distribution does not exist, no participant
/// has a positive weight, participant data is invalid, or persistence
/// fails. Existing rows are untouched on error.
pub fn run_automatic_allocation(
    persistence: &mut Persistence,
    request: RunAutomaticAllocationRequest,
    actor: Actor,
    cause: Cause,
) -> Result<RunAutomaticAllocationResponse, ApiError> {
    let (summary, event_id) = persistence
        .with_transaction(|store| {
            let transition: Transition<Vec<DistributionDetail>> =
                profit_share::run_automatic_allocation(
                    store,
                    request.distribution_id,
                    actor,
                    cause,
                )?;
            let event_id: i64 = store.persist_audit_event(&transition.audit_event)?;
            let summary: DistributionSummary =
                profit_share::distribution_summary(store, request.distribution_id)?;
            Ok((summary, event_id))
        })
        .map_err(translate_persistence_error)?;

    let residual: i64 = summary.residual();
    if residual != 0 {
        warn!(
            distribution_id = request.distribution_id,
            residual, "Automatic allocation left a rounding residual"
        );
    }
    info!(
        distribution_id = request.distribution_id,
        rows = summary.details.len(),
        event_id,
        "Ran automatic allocation"
    );

    Ok(RunAutomaticAllocationResponse {
        distribution_id: request.distribution_id,
        message: format!(
            "Allocated distribution {} across {} participants",
            request.distribution_id,
            summary.details.len()
        ),
        details: detail_infos(&summary.details)?,
        residual,
        event_id,
    })
}

/// Removes one detail row.
///
/// # Errors
///
/// Returns an error if the detail does not exist or persistence fails.
pub fn remove_detail(
    persistence: &mut Persistence,
    request: RemoveDetailRequest,
    actor: Actor,
    cause: Cause,
) -> Result<RemoveDetailResponse, ApiError> {
    let (removed, distribution_state, event_id) = persistence
        .with_transaction(|store| {
            let transition: Transition<DistributionDetail> =
                profit_share::remove_detail(store, request.detail_id, actor, cause)?;
            let event_id: i64 = store.persist_audit_event(&transition.audit_event)?;
            let state: String =
                profit_share::distribution_summary(store, transition.value.distribution_id())?
                    .distribution
                    .state()
                    .to_string();
            Ok((transition.value, state, event_id))
        })
        .map_err(translate_persistence_error)?;

    info!(
        detail_id = request.detail_id,
        distribution_id = removed.distribution_id(),
        event_id,
        "Removed distribution detail"
    );

    Ok(RemoveDetailResponse {
        removed: detail_info(&removed)?,
        message: format!("Removed detail {}", request.detail_id),
        distribution_state,
        event_id,
    })
}

/// Corrects a distribution's total profit and recomputes its amounts.
///
/// # Errors
///
/// Returns an error if the new total is not positive, the distribution
/// does not exist, or persistence fails.
pub fn update_total_profit(
    persistence: &mut Persistence,
    request: UpdateTotalProfitRequest,
    actor: Actor,
    cause: Cause,
) -> Result<UpdateTotalProfitResponse, ApiError> {
    let (summary, event_id) = persistence
        .with_transaction(|store| {
            let transition: Transition<DistributionSummary> = profit_share::update_total_profit(
                store,
                request.distribution_id,
                request.total_profit,
                actor,
                cause,
            )?;
            let event_id: i64 = store.persist_audit_event(&transition.audit_event)?;
            Ok((transition.value, event_id))
        })
        .map_err(translate_persistence_error)?;

    info!(
        distribution_id = request.distribution_id,
        total_profit = request.total_profit,
        event_id,
        "Updated distribution total profit"
    );

    Ok(UpdateTotalProfitResponse {
        summary: summary_response(&summary)?,
        message: format!(
            "Total profit of distribution {} is now {}",
            request.distribution_id, request.total_profit
        ),
        event_id,
    })
}

/// Lists every distribution, oldest first.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_distributions(
    persistence: &mut Persistence,
) -> Result<ListDistributionsResponse, ApiError> {
    let distributions: Vec<Distribution> = persistence
        .list_distributions()
        .map_err(translate_persistence_error)?;

    Ok(ListDistributionsResponse {
        distributions: distributions
            .iter()
            .map(distribution_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Returns a distribution with its detail rows and allocation totals.
///
/// # Errors
///
/// Returns an error if the distribution does not exist or persistence fails.
pub fn get_distribution_summary(
    persistence: &mut Persistence,
    distribution_id: i64,
) -> Result<DistributionSummaryResponse, ApiError> {
    let summary: DistributionSummary = persistence
        .with_transaction(|store| {
            profit_share::distribution_summary(store, distribution_id).map_err(Into::into)
        })
        .map_err(translate_persistence_error)?;

    summary_response(&summary)
}

/// Returns the audit trail of a distribution, oldest first.
///
/// # Errors
///
/// Returns an error if the distribution does not exist or persistence fails.
pub fn get_distribution_audit(
    persistence: &mut Persistence,
    distribution_id: i64,
) -> Result<AuditTrailResponse, ApiError> {
    persistence
        .get_distribution(distribution_id)
        .map_err(translate_persistence_error)?;

    let events: Vec<AuditEvent> = persistence
        .get_audit_events_for_distribution(distribution_id)
        .map_err(translate_persistence_error)?;

    Ok(AuditTrailResponse {
        distribution_id,
        events: events
            .iter()
            .map(audit_event_info)
            .collect::<Result<_, _>>()?,
    })
}
