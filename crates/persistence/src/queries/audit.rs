// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use d8tl_audit::AuditEvent;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves the audit timeline of a game in commit order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `game_id` - The game whose events to list
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn list_audit_events(conn: &mut _, game_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::game_id.eq(game_id))
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(AuditEventRow::into_event).collect()
}
}
