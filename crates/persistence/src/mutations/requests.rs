// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change request writes.

use d8tl::{ProposedChange, Review};
use d8tl_domain::{DomainError, RequestStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::schedule_change_requests;
use crate::error::PersistenceError;

backend_fn! {
/// Stores a new pending change request.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `change` - The validated proposal
/// * `now` - The submission timestamp
///
/// # Returns
///
/// The id assigned to the request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut _,
    change: &ProposedChange,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(schedule_change_requests::table)
        .values((
            schedule_change_requests::game_id.eq(change.game_id),
            schedule_change_requests::requested_by.eq(&change.requested_by),
            schedule_change_requests::request_type.eq(change.request_type.as_str()),
            schedule_change_requests::original_date.eq(change.original.date_string()),
            schedule_change_requests::original_time.eq(change.original.time_string()),
            schedule_change_requests::original_location.eq(change.original.location()),
            schedule_change_requests::requested_date.eq(change.requested.date_string()),
            schedule_change_requests::requested_time.eq(change.requested.time_string()),
            schedule_change_requests::requested_location.eq(change.requested.location()),
            schedule_change_requests::reason.eq(&change.reason),
            schedule_change_requests::request_status.eq(RequestStatus::Pending.as_str()),
            schedule_change_requests::created_date.eq(now),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Moves a pending request to its terminal status.
///
/// The update is conditional on the row still being pending, so a request
/// is finalized at most once even if two reviews race.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` wrapping
/// `DomainError::AlreadyFinalized` if the request is no longer pending.
pub fn finalize_request(conn: &mut _, review: &Review, now: &str) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        schedule_change_requests::table
            .filter(schedule_change_requests::request_id.eq(review.request_id))
            .filter(schedule_change_requests::request_status.eq(RequestStatus::Pending.as_str())),
    )
    .set((
        schedule_change_requests::request_status.eq(review.status.as_str()),
        schedule_change_requests::reviewed_by.eq(Some(review.reviewed_by.as_str())),
        schedule_change_requests::review_notes.eq(review.review_notes.as_deref()),
        schedule_change_requests::reviewed_at.eq(Some(now)),
    ))
    .execute(conn)?;

    if updated == 0 {
        let status: String = schedule_change_requests::table
            .filter(schedule_change_requests::request_id.eq(review.request_id))
            .select(schedule_change_requests::request_status)
            .first::<String>(conn)
            .optional()?
            .ok_or(PersistenceError::ChangeRequestNotFound(review.request_id))?;
        let status: RequestStatus = status
            .parse()
            .map_err(|e: DomainError| PersistenceError::ReconstructionError(e.to_string()))?;
        return Err(PersistenceError::Rejected(
            DomainError::AlreadyFinalized {
                request_id: review.request_id,
                status,
            }
            .into(),
        ));
    }
    Ok(())
}
}
