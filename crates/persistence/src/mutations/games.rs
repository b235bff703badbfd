// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Game row and schedule record writes.

use d8tl_domain::{Game, GameSetup, GameStatus, ScheduleSlot};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{MysqlConnection, SqliteConnection};
use tracing::error;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{games, schedules};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new active game.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `setup` - The validated game setup
/// * `now` - The creation timestamp
///
/// # Returns
///
/// The id assigned to the game.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateGameNumber` if the number is taken,
/// or an error if the insert fails.
pub fn insert_game(conn: &mut _, setup: &GameSetup, now: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(games::table)
        .values((
            games::game_number.eq(setup.game_number.trim()),
            games::season_id.eq(setup.season_id),
            games::division_id.eq(setup.division_id),
            games::home_team_id.eq(setup.home_team_id),
            games::away_team_id.eq(setup.away_team_id),
            games::game_status.eq(GameStatus::Active.as_str()),
            games::created_at.eq(now),
            games::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|err| match err {
            // A concurrent insert can win after the caller's lookup.
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateGameNumber(setup.game_number.trim().to_string())
            }
            other => PersistenceError::from(other),
        })?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Stores a game's scores and status.
///
/// # Errors
///
/// Returns `PersistenceError::GameNotFound` if no row was updated.
pub fn update_game(conn: &mut _, game: &Game, now: &str) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(games::table.filter(games::game_id.eq(game.game_id)))
        .set((
            games::home_score.eq(game.home_score),
            games::away_score.eq(game.away_score),
            games::game_status.eq(game.status.as_str()),
            games::updated_at.eq(now),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::GameNotFound(game.game_id));
    }
    Ok(())
}
}

backend_fn! {
/// Creates the schedule record of a new game.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the game already
/// has a record.
pub fn insert_schedule_record(
    conn: &mut _,
    game_id: i64,
    slot: &ScheduleSlot,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(schedules::table)
        .values((
            schedules::game_id.eq(game_id),
            schedules::game_date.eq(slot.date_string()),
            schedules::game_time.eq(slot.time_string()),
            schedules::location.eq(slot.location()),
            schedules::updated_at.eq(now),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Rewrites the schedule record of a game.
///
/// Only the approval workflow calls this, right after appending the
/// history entry whose slot is passed here.
///
/// # Errors
///
/// Returns `PersistenceError::ScheduleRecordMismatch` if the game has no
/// record to update.
pub fn update_schedule_record(
    conn: &mut _,
    game_id: i64,
    slot: &ScheduleSlot,
    now: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(schedules::table.filter(schedules::game_id.eq(game_id)))
        .set((
            schedules::game_date.eq(slot.date_string()),
            schedules::game_time.eq(slot.time_string()),
            schedules::location.eq(slot.location()),
            schedules::updated_at.eq(now),
        ))
        .execute(conn)?;

    if updated != 1 {
        error!(game_id, updated, "Schedule record update did not touch exactly one row");
        return Err(PersistenceError::ScheduleRecordMismatch { game_id });
    }
    Ok(())
}
}
