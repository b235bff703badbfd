// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule history reads.
//!
//! The `is_current` flag is the source of truth for a game's effective
//! schedule. The highest version number is never used as a substitute.

use d8tl_domain::HistoryEntry;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::error;

use crate::data_models::HistoryRow;
use crate::diesel_schema::schedule_history;
use crate::error::PersistenceError;

backend_fn! {
/// Returns the entry flagged current for a game.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `game_id` - The game
///
/// # Errors
///
/// Returns `PersistenceError::NoOriginalExists` if the game has no history,
/// and `PersistenceError::NoCurrentEntry` if it has history but not exactly
/// one current entry.
pub fn get_current(conn: &mut _, game_id: i64) -> Result<HistoryEntry, PersistenceError> {
    let rows: Vec<HistoryRow> = schedule_history::table
        .filter(schedule_history::game_id.eq(game_id))
        .filter(schedule_history::is_current.eq(1))
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?;

    let found: usize = rows.len();
    match <[HistoryRow; 1]>::try_from(rows) {
        Ok([row]) => row.into_entry(),
        Err(_) => {
            let total: i64 = schedule_history::table
                .filter(schedule_history::game_id.eq(game_id))
                .count()
                .get_result::<i64>(conn)?;
            if total == 0 {
                return Err(PersistenceError::NoOriginalExists { game_id });
            }
            error!(game_id, found, "Schedule history does not have exactly one current entry");
            Err(PersistenceError::NoCurrentEntry { game_id, found })
        }
    }
}
}

backend_fn! {
/// Lists every history entry of a game in ascending version order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_versions(conn: &mut _, game_id: i64) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = schedule_history::table
        .filter(schedule_history::game_id.eq(game_id))
        .select(HistoryRow::as_select())
        .order(schedule_history::version_number.asc())
        .load::<HistoryRow>(conn)?;

    rows.into_iter().map(HistoryRow::into_entry).collect()
}
}
