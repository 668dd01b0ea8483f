// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use profit_share::CoreError;
use profit_share_domain::DomainError;
use profit_share_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The violated rule, named after its error kind.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from(resource_type),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Input errors name the offending field; rule violations carry the
/// error kind as `rule`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidInvestment { .. } => invalid_input("investment_total", &err),
        DomainError::InvalidImportance { .. } => invalid_input("importance", &err),
        DomainError::InvalidWeight { .. } => invalid_input("weight", &err),
        DomainError::InvalidTotalProfit { .. } | DomainError::AmountOutOfRange { .. } => {
            invalid_input("total_profit", &err)
        }
        DomainError::InvalidPercentage { .. } => invalid_input("percentage", &err),
        DomainError::InvalidPeriod(_) => invalid_input("period", &err),
        DomainError::InvalidDistributionState(_) => invalid_input("state", &err),
        DomainError::DistributionNotFound(_) => not_found("Distribution", &err),
        DomainError::DetailNotFound(_) => not_found("Distribution detail", &err),
        DomainError::ParticipantNotFound(_) => not_found("Participant", &err),
        DomainError::NoEligibleParticipants
        | DomainError::DuplicateParticipant { .. }
        | DomainError::OverAllocation { .. }
        | DomainError::InvalidState { .. } => ApiError::DomainRuleViolation {
            rule: String::from(err.kind()),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Core(core_err) => translate_core_error(core_err),
        PersistenceError::DistributionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Distribution"),
            message: format!("Distribution {id} not found"),
        },
        PersistenceError::ParticipantNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant {id} not found"),
        },
        PersistenceError::RoleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Role"),
            message: format!("Role {id} not found"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} not found"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
