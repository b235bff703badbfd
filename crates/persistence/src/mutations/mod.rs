// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `games`: Game rows and schedule records
//! - `ledger`: Schedule history appends
//! - `requests`: Change request inserts and finalization
//! - `workflow`: Transactional command execution built on the above
//!
//! Only `workflow` opens transactions. The other modules assume they run
//! inside one.

pub mod audit;
pub mod games;
pub mod ledger;
pub mod requests;
pub mod workflow;

pub use workflow::{CommandOutcome, GameCreated};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Returns the current UTC time as an RFC 3339 string.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
