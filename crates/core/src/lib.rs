// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod lifecycle;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::CoreError;
pub use lifecycle::{
    add_manual_detail, create_distribution, distribution_summary, remove_detail,
    run_automatic_allocation, update_total_profit,
};
pub use state::{DistributionSummary, Transition};
pub use store::{DistributionStore, StoreError};
