// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{GAME_ID, eagle_hill, wellwood};
use crate::{
    DomainError, GameSetup, MAX_ACTOR_LEN, MAX_GAME_NUMBER_LEN, RequestType, ScheduleSlot,
    validate_change, validate_game_number, validate_reason, validate_requester, validate_score,
    validate_teams,
};

#[test]
fn test_blank_game_number_rejected() {
    assert!(validate_game_number("U12-101").is_ok());
    assert!(matches!(
        validate_game_number("  "),
        Err(DomainError::InvalidGameNumber(_))
    ));
}

#[test]
fn test_game_number_length_limit() {
    assert!(validate_game_number(&"9".repeat(MAX_GAME_NUMBER_LEN)).is_ok());
    assert!(validate_game_number(&format!("  {}  ", "9".repeat(MAX_GAME_NUMBER_LEN))).is_ok());
    assert!(matches!(
        validate_game_number(&"9".repeat(MAX_GAME_NUMBER_LEN + 1)),
        Err(DomainError::InvalidGameNumber(_))
    ));
}

#[test]
fn test_requester_length_limit() {
    assert!(validate_requester(&"c".repeat(MAX_ACTOR_LEN)).is_ok());
    assert!(matches!(
        validate_requester(&"c".repeat(MAX_ACTOR_LEN + 1)),
        Err(DomainError::InvalidRequester(_))
    ));
}

#[test]
fn test_team_cannot_play_itself() {
    assert!(validate_teams(10, 11).is_ok());
    assert!(matches!(
        validate_teams(10, 10),
        Err(DomainError::InvalidTeams { .. })
    ));
}

#[test]
fn test_negative_scores_rejected() {
    assert!(validate_score(0, 0).is_ok());
    assert!(validate_score(12, 3).is_ok());
    assert!(validate_score(-1, 3).is_err());
    assert!(validate_score(2, -3).is_err());
}

#[test]
fn test_reason_and_requester_required() {
    assert!(validate_reason("Field flooded").is_ok());
    assert!(matches!(
        validate_reason(""),
        Err(DomainError::InvalidReason(_))
    ));
    assert!(validate_requester("coach-smith").is_ok());
    assert!(matches!(
        validate_requester(" "),
        Err(DomainError::InvalidRequester(_))
    ));
}

#[test]
fn test_game_setup_validation() {
    let setup: GameSetup = GameSetup {
        game_number: String::from("U12-101"),
        season_id: 1,
        division_id: 2,
        home_team_id: 10,
        away_team_id: 10,
        slot: eagle_hill(),
    };
    assert!(matches!(
        setup.validate(),
        Err(DomainError::InvalidTeams { .. })
    ));
}

#[test]
fn test_identical_request_is_no_change() {
    let result = validate_change(
        GAME_ID,
        RequestType::Reschedule,
        &eagle_hill(),
        &eagle_hill(),
    );
    assert_eq!(result, Err(DomainError::NoChange { game_id: GAME_ID }));
}

#[test]
fn test_reschedule_to_new_slot_is_valid() {
    assert!(validate_change(GAME_ID, RequestType::Reschedule, &eagle_hill(), &wellwood()).is_ok());
}

#[test]
fn test_location_change_must_keep_date_and_time() {
    let same_time_new_venue: ScheduleSlot =
        ScheduleSlot::parse("2024-07-15", "18:00", "Wellwood MS").unwrap();
    assert!(
        validate_change(
            GAME_ID,
            RequestType::LocationChange,
            &eagle_hill(),
            &same_time_new_venue
        )
        .is_ok()
    );

    let result = validate_change(
        GAME_ID,
        RequestType::LocationChange,
        &eagle_hill(),
        &wellwood(),
    );
    assert_eq!(
        result,
        Err(DomainError::LocationChangeAltersDateTime { game_id: GAME_ID })
    );
}

#[test]
fn test_cancel_must_target_cancellation_marker() {
    let original: ScheduleSlot = eagle_hill();
    let cancelled: ScheduleSlot = ScheduleSlot::cancelled(original.date(), original.time());

    assert!(validate_change(GAME_ID, RequestType::Cancel, &original, &cancelled).is_ok());
    assert!(matches!(
        validate_change(GAME_ID, RequestType::Cancel, &original, &wellwood()),
        Err(DomainError::InvalidLocation(_))
    ));
    assert!(matches!(
        validate_change(GAME_ID, RequestType::Reschedule, &original, &cancelled),
        Err(DomainError::InvalidLocation(_))
    ));
}
