// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `distributions`: distributions and their detail rows
//! - `participants`: participants, roles and allocation standings
//! - `audit`: audit trail retrieval

pub mod audit;
pub mod distributions;
pub mod participants;
