// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule history appends.
//!
//! History rows are append-only. The only column ever updated after
//! insert is `is_current`, and only by `append_change` while it moves the
//! flag to the entry it inserts.

use d8tl_domain::{HistoryEntry, ScheduleSlot, ScheduleType};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::schedule_history;
use crate::error::PersistenceError;

backend_fn! {
/// Records the first schedule of a game as version 1.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `game_id` - The game
/// * `slot` - The original schedule
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateOriginal` if the game already has a
/// version-1 entry.
pub fn append_original(
    conn: &mut _,
    game_id: i64,
    slot: &ScheduleSlot,
    now: &str,
) -> Result<HistoryEntry, PersistenceError> {
    let existing: i64 = schedule_history::table
        .filter(schedule_history::game_id.eq(game_id))
        .filter(schedule_history::version_number.eq(1))
        .count()
        .get_result::<i64>(conn)?;
    if existing > 0 {
        return Err(PersistenceError::DuplicateOriginal { game_id });
    }

    diesel::insert_into(schedule_history::table)
        .values((
            schedule_history::game_id.eq(game_id),
            schedule_history::version_number.eq(1),
            schedule_history::schedule_type.eq(ScheduleType::Original.as_str()),
            schedule_history::game_date.eq(slot.date_string()),
            schedule_history::game_time.eq(slot.time_string()),
            schedule_history::location.eq(slot.location()),
            schedule_history::is_current.eq(1),
            schedule_history::created_at.eq(now),
        ))
        .execute(conn)?;
    let history_id: i64 = conn.get_last_insert_rowid()?;

    debug!(game_id, history_id, "Recorded original schedule");

    Ok(HistoryEntry {
        history_id,
        game_id,
        version_number: 1,
        schedule_type: ScheduleType::Original,
        slot: slot.clone(),
        is_current: true,
        change_request_id: None,
        notes: None,
        created_at: now.to_string(),
    })
}
}

backend_fn! {
/// Appends an approved change as the game's new current entry.
///
/// The new entry gets the next version number. The previous current entry
/// is cleared before the insert so that at no point two entries are
/// flagged current. Callers must run this inside a write transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `game_id` - The game
/// * `slot` - The approved schedule
/// * `change_request_id` - The approved request
/// * `notes` - Free-form notes, usually the request's reason
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns `PersistenceError::NoOriginalExists` if the game has no
/// version-1 entry.
pub fn append_change(
    conn: &mut _,
    game_id: i64,
    slot: &ScheduleSlot,
    change_request_id: i64,
    notes: Option<&str>,
    now: &str,
) -> Result<HistoryEntry, PersistenceError> {
    let originals: i64 = schedule_history::table
        .filter(schedule_history::game_id.eq(game_id))
        .filter(schedule_history::version_number.eq(1))
        .count()
        .get_result::<i64>(conn)?;
    if originals == 0 {
        return Err(PersistenceError::NoOriginalExists { game_id });
    }

    let max_version: i32 = schedule_history::table
        .filter(schedule_history::game_id.eq(game_id))
        .select(diesel::dsl::max(schedule_history::version_number))
        .first::<Option<i32>>(conn)?
        .unwrap_or(1);
    let next_version: i32 = max_version.checked_add(1).ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "game {game_id} has exhausted its version numbers"
        ))
    })?;
    let version_number: u32 = next_version.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "game {game_id} has invalid version number {next_version}"
        ))
    })?;

    diesel::update(
        schedule_history::table
            .filter(schedule_history::game_id.eq(game_id))
            .filter(schedule_history::is_current.eq(1)),
    )
    .set(schedule_history::is_current.eq(0))
    .execute(conn)?;

    diesel::insert_into(schedule_history::table)
        .values((
            schedule_history::game_id.eq(game_id),
            schedule_history::version_number.eq(next_version),
            schedule_history::schedule_type.eq(ScheduleType::Changed.as_str()),
            schedule_history::game_date.eq(slot.date_string()),
            schedule_history::game_time.eq(slot.time_string()),
            schedule_history::location.eq(slot.location()),
            schedule_history::is_current.eq(1),
            schedule_history::change_request_id.eq(Some(change_request_id)),
            schedule_history::notes.eq(notes),
            schedule_history::created_at.eq(now),
        ))
        .execute(conn)?;
    let history_id: i64 = conn.get_last_insert_rowid()?;

    debug!(game_id, history_id, version_number, change_request_id, "Appended schedule change");

    Ok(HistoryEntry {
        history_id,
        game_id,
        version_number,
        schedule_type: ScheduleType::Changed,
        slot: slot.clone(),
        is_current: true,
        change_request_id: Some(change_request_id),
        notes: notes.map(str::to_string),
        created_at: now.to_string(),
    })
}
}
