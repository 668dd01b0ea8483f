// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use profit_share_domain::{Distribution, DistributionDetail};

use crate::data_models::{DistributionDetailRow, DistributionRow};
use crate::diesel_schema::{distribution_details, distributions};
use crate::error::PersistenceError;

/// Loads a distribution by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn get_distribution(
    conn: &mut SqliteConnection,
    distribution_id: i64,
) -> Result<Option<Distribution>, PersistenceError> {
    distributions::table
        .filter(distributions::distribution_id.eq(distribution_id))
        .select(DistributionRow::as_select())
        .first::<DistributionRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_distribution: {e}")))?
        .map(DistributionRow::into_domain)
        .transpose()
}

/// Lists every distribution, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_distributions(
    conn: &mut SqliteConnection,
) -> Result<Vec<Distribution>, PersistenceError> {
    distributions::table
        .order(distributions::distribution_id.asc())
        .select(DistributionRow::as_select())
        .load::<DistributionRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_distributions: {e}")))?
        .into_iter()
        .map(DistributionRow::into_domain)
        .collect()
}

/// Finds distributions whose period label matches exactly.
///
/// Period labels are not unique; callers use this to warn about reuse.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn find_distributions_by_period(
    conn: &mut SqliteConnection,
    period: &str,
) -> Result<Vec<Distribution>, PersistenceError> {
    distributions::table
        .filter(distributions::period.eq(period.trim()))
        .order(distributions::distribution_id.asc())
        .select(DistributionRow::as_select())
        .load::<DistributionRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("find_distributions_by_period: {e}")))?
        .into_iter()
        .map(DistributionRow::into_domain)
        .collect()
}

/// Lists the detail rows of a distribution in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_distribution_details(
    conn: &mut SqliteConnection,
    distribution_id: i64,
) -> Result<Vec<DistributionDetail>, PersistenceError> {
    let rows: Vec<DistributionDetailRow> = distribution_details::table
        .filter(distribution_details::distribution_id.eq(distribution_id))
        .order(distribution_details::detail_id.asc())
        .select(DistributionDetailRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_distribution_details: {e}")))?;

    Ok(rows
        .into_iter()
        .map(DistributionDetailRow::into_domain)
        .collect())
}

/// Loads a single detail row by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_distribution_detail(
    conn: &mut SqliteConnection,
    detail_id: i64,
) -> Result<Option<DistributionDetail>, PersistenceError> {
    let row: Option<DistributionDetailRow> = distribution_details::table
        .filter(distribution_details::detail_id.eq(detail_id))
        .select(DistributionDetailRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_distribution_detail: {e}")))?;

    Ok(row.map(DistributionDetailRow::into_domain))
}
