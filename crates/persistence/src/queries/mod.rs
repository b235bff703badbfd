// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event queries
//! - `games`: Game and schedule record lookups
//! - `ledger`: Schedule history reads (`get_current`, `list_versions`)
//! - `requests`: Change request lookups and listings
//! - `views`: Read paths composed from the above, plus the consistency job
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `ScheduleStore` implementations in `store.rs` dispatch to the
//! appropriate version for each connection type.

pub mod audit;
pub mod games;
pub mod ledger;
pub mod requests;
pub mod views;

pub use requests::RequestFilter;
pub use views::{ConsistencyReport, GameSchedule};
