// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the profit distribution engine.
//!
//! Handlers take plain request DTOs, run the matching lifecycle operation
//! against a `Persistence` handle, and return response DTOs or an
//! `ApiError`. Transport concerns (HTTP status codes, JSON) belong to the
//! server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_manual_detail, create_distribution, get_distribution_audit, get_distribution_summary,
    list_distributions, remove_detail, run_automatic_allocation, update_total_profit,
};
pub use request_response::{
    AddManualDetailRequest, AddManualDetailResponse, AuditEventInfo, AuditTrailResponse,
    CreateDistributionRequest, CreateDistributionResponse, DetailInfo, DistributionInfo,
    DistributionSummaryResponse, ListDistributionsResponse, RemoveDetailRequest,
    RemoveDetailResponse, RunAutomaticAllocationRequest, RunAutomaticAllocationResponse,
    UpdateTotalProfitRequest, UpdateTotalProfitResponse,
};
