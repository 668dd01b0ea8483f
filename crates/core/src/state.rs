// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use profit_share_audit::{AuditEvent, StateSnapshot};
use profit_share_domain::{Distribution, DistributionDetail, total_percentage};

/// A distribution together with its current detail rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    /// The distribution record.
    pub distribution: Distribution,
    /// Its detail rows, in insertion order.
    pub details: Vec<DistributionDetail>,
}

impl DistributionSummary {
    /// Creates a summary from a distribution and its detail rows.
    #[must_use]
    pub const fn new(distribution: Distribution, details: Vec<DistributionDetail>) -> Self {
        Self {
            distribution,
            details,
        }
    }

    /// Sum of all detail percentages.
    #[must_use]
    pub fn allocated_percentage(&self) -> f64 {
        total_percentage(&self.details)
    }

    /// Sum of all detail amounts.
    #[must_use]
    pub fn allocated_amount(&self) -> i64 {
        self.details
            .iter()
            .fold(0_i64, |acc, d| acc.saturating_add(d.amount()))
    }

    /// Total profit not covered by detail amounts.
    ///
    /// For a fully allocated distribution this is the rounding residual.
    #[must_use]
    pub fn residual(&self) -> i64 {
        self.distribution
            .total_profit()
            .saturating_sub(self.allocated_amount())
    }

    /// Converts the summary to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "distribution_id={},period={},state={},total_profit={},details_count={},allocated_percentage={:.2},allocated_amount={}",
            self.distribution
                .distribution_id()
                .map_or_else(|| String::from("none"), |id| id.to_string()),
            self.distribution.period(),
            self.distribution.state(),
            self.distribution.total_profit(),
            self.details.len(),
            self.allocated_percentage(),
            self.allocated_amount()
        ))
    }
}

/// The result of a successful lifecycle operation.
///
/// The audit event is not persisted by the core; the caller stores it
/// alongside the operation's writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    /// The operation's result.
    pub value: T,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
