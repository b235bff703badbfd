// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change request queries.

use d8tl_domain::{ChangeRequest, RequestStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::ChangeRequestRow;
use crate::diesel_schema::schedule_change_requests;
use crate::error::PersistenceError;

/// Optional filters for listing change requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Only requests for this game.
    pub game_id: Option<i64>,
    /// Only requests in this status.
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    /// Creates a filter matching every request of one game.
    #[must_use]
    pub const fn for_game(game_id: i64) -> Self {
        Self {
            game_id: Some(game_id),
            status: None,
        }
    }

    /// Narrows the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

backend_fn! {
/// Retrieves a change request by id.
///
/// # Errors
///
/// Returns `PersistenceError::ChangeRequestNotFound` if no such request
/// exists, or an error if the stored row is invalid.
pub fn get_request(conn: &mut _, request_id: i64) -> Result<ChangeRequest, PersistenceError> {
    let row: ChangeRequestRow = schedule_change_requests::table
        .filter(schedule_change_requests::request_id.eq(request_id))
        .select(ChangeRequestRow::as_select())
        .first::<ChangeRequestRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ChangeRequestNotFound(request_id))?;

    row.into_request()
}
}

backend_fn! {
/// Lists change requests matching `filter`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_requests(
    conn: &mut _,
    filter: RequestFilter,
) -> Result<Vec<ChangeRequest>, PersistenceError> {
    let mut query = schedule_change_requests::table
        .select(ChangeRequestRow::as_select())
        .into_boxed();

    if let Some(game_id) = filter.game_id {
        query = query.filter(schedule_change_requests::game_id.eq(game_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(schedule_change_requests::request_status.eq(status.as_str()));
    }

    let rows: Vec<ChangeRequestRow> = query
        .order(schedule_change_requests::request_id.asc())
        .load::<ChangeRequestRow>(conn)?;

    rows.into_iter().map(ChangeRequestRow::into_request).collect()
}
}
