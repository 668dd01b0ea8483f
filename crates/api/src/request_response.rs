// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// API request to declare a new distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDistributionRequest {
    /// The period label (e.g., `2026-Q1`).
    pub period: String,
    /// The distribution date, `YYYY-MM-DD`.
    pub distribution_date: String,
    /// The profit to distribute, in whole currency units.
    pub total_profit: i64,
}

/// API request to enter one detail row by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddManualDetailRequest {
    /// The target distribution.
    pub distribution_id: i64,
    /// The participant receiving the share.
    pub participant_id: i64,
    /// The share, in percent.
    pub percentage: f64,
}

/// API request to recompute a distribution from participant weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAutomaticAllocationRequest {
    /// The target distribution.
    pub distribution_id: i64,
}

/// API request to remove a detail row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDetailRequest {
    /// The detail row to remove.
    pub detail_id: i64,
}

/// API request to correct a distribution's total profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTotalProfitRequest {
    /// The target distribution.
    pub distribution_id: i64,
    /// The corrected total profit.
    pub total_profit: i64,
}

/// A distribution as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionInfo {
    pub distribution_id: i64,
    pub period: String,
    /// `YYYY-MM-DD`.
    pub distribution_date: String,
    pub total_profit: i64,
    /// `Pending` or `Distributed`.
    pub state: String,
}

/// A detail row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailInfo {
    pub detail_id: i64,
    pub distribution_id: i64,
    pub participant_id: i64,
    pub percentage: f64,
    pub amount: i64,
}

/// API response for a created distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDistributionResponse {
    /// The created distribution.
    pub distribution: DistributionInfo,
    /// The audit event recording the creation.
    pub event_id: i64,
    /// True if another distribution already used this period label.
    pub duplicate_period: bool,
    /// A success message.
    pub message: String,
}

/// API response for a manually entered detail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddManualDetailResponse {
    /// The stored detail row.
    pub detail: DetailInfo,
    /// The distribution's state after the entry.
    pub distribution_state: String,
    /// The audit event recording the entry.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for an automatic allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAutomaticAllocationResponse {
    pub distribution_id: i64,
    /// The freshly computed detail rows.
    pub details: Vec<DetailInfo>,
    /// Total profit minus the sum of allocated amounts.
    pub residual: i64,
    /// The audit event recording the run.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a removed detail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveDetailResponse {
    /// The row that was removed.
    pub removed: DetailInfo,
    /// The distribution's state after the removal.
    pub distribution_state: String,
    /// The audit event recording the removal.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A distribution with its detail rows and allocation totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummaryResponse {
    pub distribution: DistributionInfo,
    pub details: Vec<DetailInfo>,
    /// Sum of detail percentages.
    pub allocated_percentage: f64,
    /// Sum of detail amounts.
    pub allocated_amount: i64,
    /// Total profit not covered by detail amounts.
    pub residual: i64,
}

/// API response for a total profit correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTotalProfitResponse {
    /// The distribution after the correction.
    pub summary: DistributionSummaryResponse,
    /// The audit event recording the correction.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing distributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDistributionsResponse {
    pub distributions: Vec<DistributionInfo>,
}

/// One audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: i64,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
}

/// API response carrying a distribution's audit trail, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailResponse {
    pub distribution_id: i64,
    pub events: Vec<AuditEventInfo>,
}
