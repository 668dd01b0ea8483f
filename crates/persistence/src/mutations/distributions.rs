// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use profit_share_domain::{Distribution, DistributionDetail, DistributionState};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewDistributionDetail;
use crate::diesel_schema::{distribution_details, distributions};
use crate::error::PersistenceError;

/// Inserts a distribution and returns it with its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_distribution(
    conn: &mut SqliteConnection,
    distribution: &Distribution,
) -> Result<Distribution, PersistenceError> {
    diesel::insert_into(distributions::table)
        .values((
            distributions::period.eq(distribution.period()),
            distributions::distribution_date.eq(distribution.distribution_date().to_string()),
            distributions::total_profit.eq(distribution.total_profit()),
            distributions::state.eq(distribution.state().as_str()),
        ))
        .execute(conn)?;

    let distribution_id: i64 = get_last_insert_rowid(conn)?;
    debug!(distribution_id, period = distribution.period(), "Inserted distribution");

    Ok(Distribution::with_id(
        distribution_id,
        distribution.period(),
        distribution.distribution_date(),
        distribution.total_profit(),
        distribution.state(),
    ))
}

/// Inserts one detail row and returns it with its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including a violation of the
/// one-row-per-participant constraint.
pub fn insert_distribution_detail(
    conn: &mut SqliteConnection,
    detail: &DistributionDetail,
) -> Result<DistributionDetail, PersistenceError> {
    diesel::insert_into(distribution_details::table)
        .values(NewDistributionDetail::from(detail))
        .execute(conn)?;

    let detail_id: i64 = get_last_insert_rowid(conn)?;

    Ok(DistributionDetail::with_id(
        detail_id,
        detail.distribution_id(),
        detail.participant_id(),
        detail.percentage(),
        detail.amount(),
    ))
}

/// Deletes every detail row of a distribution and inserts `details`.
///
/// Runs in its own (nested) transaction so the delete and the inserts
/// commit or roll back together.
///
/// # Errors
///
/// Returns an error if any statement fails; no rows change in that case.
pub fn replace_distribution_details(
    conn: &mut SqliteConnection,
    distribution_id: i64,
    details: &[DistributionDetail],
) -> Result<Vec<DistributionDetail>, PersistenceError> {
    conn.transaction(|conn| {
        let removed: usize = diesel::delete(
            distribution_details::table
                .filter(distribution_details::distribution_id.eq(distribution_id)),
        )
        .execute(conn)?;

        let inserted: Vec<DistributionDetail> = details
            .iter()
            .map(|detail| insert_distribution_detail(conn, detail))
            .collect::<Result<_, _>>()?;

        debug!(
            distribution_id,
            removed,
            inserted = inserted.len(),
            "Replaced distribution details"
        );
        Ok(inserted)
    })
}

/// Deletes a single detail row.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_distribution_detail(
    conn: &mut SqliteConnection,
    detail_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(distribution_details::table.filter(distribution_details::detail_id.eq(detail_id)))
        .execute(conn)?;
    Ok(())
}

/// Sets a distribution's state.
///
/// # Errors
///
/// Returns an error if the update fails or the distribution does not exist.
pub fn update_distribution_state(
    conn: &mut SqliteConnection,
    distribution_id: i64,
    state: DistributionState,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        distributions::table.filter(distributions::distribution_id.eq(distribution_id)),
    )
    .set(distributions::state.eq(state.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::DistributionNotFound(distribution_id));
    }
    Ok(())
}

/// Sets a distribution's total profit.
///
/// # Errors
///
/// Returns an error if the update fails or the distribution does not exist.
pub fn update_distribution_total_profit(
    conn: &mut SqliteConnection,
    distribution_id: i64,
    total_profit: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        distributions::table.filter(distributions::distribution_id.eq(distribution_id)),
    )
    .set(distributions::total_profit.eq(total_profit))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::DistributionNotFound(distribution_id));
    }
    Ok(())
}

/// Overwrites the amount of each `(detail_id, amount)` pair.
///
/// # Errors
///
/// Returns an error if any update fails.
pub fn update_detail_amounts(
    conn: &mut SqliteConnection,
    amounts: &[(i64, i64)],
) -> Result<(), PersistenceError> {
    for &(detail_id, amount) in amounts {
        diesel::update(
            distribution_details::table.filter(distribution_details::detail_id.eq(detail_id)),
        )
        .set(distribution_details::amount.eq(amount))
        .execute(conn)?;
    }
    Ok(())
}

/// Deletes a distribution. Its detail rows go with it.
///
/// # Errors
///
/// Returns an error if the delete fails or the distribution does not exist.
pub fn delete_distribution(
    conn: &mut SqliteConnection,
    distribution_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        distributions::table.filter(distributions::distribution_id.eq(distribution_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::DistributionNotFound(distribution_id));
    }
    Ok(())
}
