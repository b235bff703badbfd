// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use d8tl_audit::Cause;
use d8tl_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateGameRequest, ReviewScheduleChangeRequest, Role,
    SubmitScheduleChangeRequest, create_game, submit_schedule_change,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_coach() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("coach-456"), Role::Coach)
}

pub fn create_other_coach() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("coach-789"), Role::Coach)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_game_request(game_number: &str) -> CreateGameRequest {
    CreateGameRequest {
        game_number: game_number.to_string(),
        season_id: 2024,
        division_id: 12,
        home_team_id: 1,
        away_team_id: 2,
        game_date: String::from("2024-07-15"),
        game_time: String::from("18:00"),
        location: String::from("Eagle Hill MS"),
    }
}

pub fn reschedule_to_wellwood(game_id: i64) -> SubmitScheduleChangeRequest {
    SubmitScheduleChangeRequest {
        game_id,
        request_type: String::from("Reschedule"),
        game_date: Some(String::from("2024-07-16")),
        game_time: Some(String::from("18:00")),
        location: Some(String::from("Wellwood MS")),
        reason: String::from("Field unavailable"),
    }
}

pub fn cancel_request(game_id: i64) -> SubmitScheduleChangeRequest {
    SubmitScheduleChangeRequest {
        game_id,
        request_type: String::from("Cancel"),
        game_date: None,
        game_time: None,
        location: None,
        reason: String::from("Not enough players"),
    }
}

pub const fn review_request(request_id: i64) -> ReviewScheduleChangeRequest {
    ReviewScheduleChangeRequest {
        request_id,
        review_notes: None,
    }
}

/// Creates an in-memory store holding one game at Eagle Hill MS.
pub fn setup_with_game() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let game_id: i64 = create_game(
        &mut persistence,
        &create_game_request("U12-101"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap()
    .game
    .game_id;
    (persistence, game_id)
}

/// Submits a change request as the test coach and returns its id.
pub fn submit_as_coach(
    persistence: &mut Persistence,
    request: &SubmitScheduleChangeRequest,
) -> i64 {
    submit_schedule_change(
        persistence,
        request,
        &create_test_coach(),
        create_test_cause(),
    )
    .unwrap()
    .request
    .request_id
}
