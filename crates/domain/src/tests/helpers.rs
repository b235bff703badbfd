// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ChangeRequest, Game, GameStatus, HistoryEntry, RequestStatus, RequestType, ScheduleRecord,
    ScheduleSlot, ScheduleType,
};

pub const GAME_ID: i64 = 7;

pub fn eagle_hill() -> ScheduleSlot {
    ScheduleSlot::parse("2024-07-15", "18:00", "Eagle Hill MS").unwrap()
}

pub fn wellwood() -> ScheduleSlot {
    ScheduleSlot::parse("2024-07-16", "18:00", "Wellwood MS").unwrap()
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

pub fn record(slot: &ScheduleSlot) -> ScheduleRecord {
    ScheduleRecord {
        game_id: GAME_ID,
        slot: slot.clone(),
    }
}

pub fn original_entry(slot: &ScheduleSlot, is_current: bool) -> HistoryEntry {
    HistoryEntry {
        history_id: 1,
        game_id: GAME_ID,
        version_number: 1,
        schedule_type: ScheduleType::Original,
        slot: slot.clone(),
        is_current,
        change_request_id: None,
        notes: None,
        created_at: String::from("2024-06-01T12:00:00Z"),
    }
}

pub fn changed_entry(
    version_number: u32,
    slot: &ScheduleSlot,
    request_id: i64,
    is_current: bool,
) -> HistoryEntry {
    HistoryEntry {
        history_id: i64::from(version_number),
        game_id: GAME_ID,
        version_number,
        schedule_type: ScheduleType::Changed,
        slot: slot.clone(),
        is_current,
        change_request_id: Some(request_id),
        notes: Some(String::from("Field conflict")),
        created_at: String::from("2024-06-02T12:00:00Z"),
    }
}

pub fn request(
    request_id: i64,
    request_type: RequestType,
    original: &ScheduleSlot,
    requested: &ScheduleSlot,
    status: RequestStatus,
) -> ChangeRequest {
    ChangeRequest {
        request_id: Some(request_id),
        game_id: GAME_ID,
        requested_by: String::from("coach-smith"),
        request_type,
        original: original.clone(),
        requested: requested.clone(),
        reason: String::from("Field conflict"),
        status,
        reviewed_by: None,
        review_notes: None,
        created_at: String::from("2024-06-02T11:00:00Z"),
        reviewed_at: None,
    }
}
