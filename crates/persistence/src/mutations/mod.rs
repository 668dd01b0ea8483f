// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `distributions`: distributions and detail rows
//! - `participants`: role and participant bookkeeping
//! - `audit`: audit event persistence

pub mod audit;
pub mod distributions;
pub mod participants;
