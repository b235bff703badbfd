// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod concurrency_tests;

use d8tl::Command;
use d8tl_audit::{Actor, Cause};
use d8tl_domain::{GameSetup, RequestType, ScheduleSlot};
use diesel::SqliteConnection;
use time::macros::{date, time};

use crate::{BackendConnection, CommandOutcome, Persistence};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn eagle_hill() -> ScheduleSlot {
    ScheduleSlot::new(date!(2024 - 07 - 15), time!(18:00), "Eagle Hill MS").unwrap()
}

pub fn wellwood() -> ScheduleSlot {
    ScheduleSlot::new(date!(2024 - 07 - 16), time!(18:00), "Wellwood MS").unwrap()
}

pub fn create_test_setup(game_number: &str) -> GameSetup {
    GameSetup {
        game_number: game_number.to_string(),
        season_id: 2024,
        division_id: 3,
        home_team_id: 21,
        away_team_id: 22,
        slot: eagle_hill(),
    }
}

/// Creates a fresh in-memory database holding one game.
pub fn persistence_with_game() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let game_id: i64 = persistence
        .create_game(
            create_test_setup("U12-101"),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
        .game
        .game_id;
    (persistence, game_id)
}

pub fn submit(
    persistence: &mut Persistence,
    game_id: i64,
    request_type: RequestType,
    requested: Option<ScheduleSlot>,
) -> i64 {
    let outcome: CommandOutcome = persistence
        .execute(
            game_id,
            Command::SubmitChangeRequest {
                requested_by: String::from("coach-smith"),
                request_type,
                requested,
                reason: String::from("Field conflict"),
            },
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    outcome.request.unwrap().request_id.unwrap()
}

pub fn approve_command(request_id: i64) -> Command {
    Command::ApproveChangeRequest {
        request_id,
        reviewed_by: String::from("admin-1"),
        review_notes: Some(String::from("Approved")),
    }
}

pub fn deny_command(request_id: i64) -> Command {
    Command::DenyChangeRequest {
        request_id,
        reviewed_by: String::from("admin-1"),
        review_notes: Some(String::from("Field unavailable")),
    }
}

/// Returns the raw `SQLite` connection behind a test persistence handle.
pub fn sqlite_conn(persistence: &mut Persistence) -> &mut SqliteConnection {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => conn,
        BackendConnection::Mysql(_) => panic!("tests run against SQLite"),
    }
}
