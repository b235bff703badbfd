// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Game and schedule record queries.

use d8tl_domain::{Game, ScheduleRecord};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{GameRow, ScheduleRow};
use crate::diesel_schema::{games, schedules};
use crate::error::PersistenceError;

backend_fn! {
/// Looks up a game by its internal id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_game(conn: &mut _, game_id: i64) -> Result<Option<Game>, PersistenceError> {
    let row: Option<GameRow> = games::table
        .filter(games::game_id.eq(game_id))
        .select(GameRow::as_select())
        .first::<GameRow>(conn)
        .optional()?;

    row.map(GameRow::into_game).transpose()
}
}

backend_fn! {
/// Looks up a game by its external game number.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_game_by_number(
    conn: &mut _,
    game_number: &str,
) -> Result<Option<Game>, PersistenceError> {
    let row: Option<GameRow> = games::table
        .filter(games::game_number.eq(game_number))
        .select(GameRow::as_select())
        .first::<GameRow>(conn)
        .optional()?;

    row.map(GameRow::into_game).transpose()
}
}

backend_fn! {
/// Lists every game ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_games(conn: &mut _) -> Result<Vec<Game>, PersistenceError> {
    let rows: Vec<GameRow> = games::table
        .select(GameRow::as_select())
        .order(games::game_id.asc())
        .load::<GameRow>(conn)?;

    rows.into_iter().map(GameRow::into_game).collect()
}
}

backend_fn! {
/// Retrieves the schedule record of a game.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_schedule_record(
    conn: &mut _,
    game_id: i64,
) -> Result<Option<ScheduleRecord>, PersistenceError> {
    let row: Option<ScheduleRow> = schedules::table
        .filter(schedules::game_id.eq(game_id))
        .select(ScheduleRow::as_select())
        .first::<ScheduleRow>(conn)
        .optional()?;

    row.map(ScheduleRow::into_record).transpose()
}
}
