// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::GameState;
use d8tl_audit::{Actor, Cause};
use d8tl_domain::{
    ChangeRequest, Game, GameStatus, HistoryEntry, RequestStatus, RequestType, ScheduleSlot,
    ScheduleType,
};
use time::macros::{date, time};

pub const GAME_ID: i64 = 12;
pub const REQUEST_ID: i64 = 30;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn eagle_hill() -> ScheduleSlot {
    ScheduleSlot::new(date!(2024 - 07 - 15), time!(18:00), "Eagle Hill MS").unwrap()
}

pub fn wellwood() -> ScheduleSlot {
    ScheduleSlot::new(date!(2024 - 07 - 16), time!(18:00), "Wellwood MS").unwrap()
}

pub fn create_test_game(status: GameStatus) -> Game {
    Game {
        game_id: GAME_ID,
        game_number: String::from("U12-101"),
        season_id: 1,
        division_id: 2,
        home_team_id: 10,
        away_team_id: 11,
        home_score: None,
        away_score: None,
        status,
    }
}

pub fn create_test_state(status: GameStatus) -> GameState {
    let current: HistoryEntry = HistoryEntry {
        history_id: 1,
        game_id: GAME_ID,
        version_number: 1,
        schedule_type: ScheduleType::Original,
        slot: eagle_hill(),
        is_current: true,
        change_request_id: None,
        notes: None,
        created_at: String::from("2024-06-01T12:00:00Z"),
    };
    GameState::new(create_test_game(status), current)
}

pub fn create_test_request(request_type: RequestType, status: RequestStatus) -> ChangeRequest {
    let requested: ScheduleSlot = match request_type {
        RequestType::Cancel => ScheduleSlot::cancelled(date!(2024 - 07 - 15), time!(18:00)),
        RequestType::LocationChange => {
            ScheduleSlot::new(date!(2024 - 07 - 15), time!(18:00), "Wellwood MS").unwrap()
        }
        RequestType::Reschedule => wellwood(),
    };
    ChangeRequest {
        request_id: Some(REQUEST_ID),
        game_id: GAME_ID,
        requested_by: String::from("coach-smith"),
        request_type,
        original: eagle_hill(),
        requested,
        reason: String::from("Field conflict"),
        status,
        reviewed_by: None,
        review_notes: None,
        created_at: String::from("2024-06-02T11:00:00Z"),
        reviewed_at: None,
    }
}

pub fn state_with_request(
    status: GameStatus,
    request_type: RequestType,
    request_status: RequestStatus,
) -> GameState {
    create_test_state(status).with_request(create_test_request(request_type, request_status))
}
