// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    GAME_ID, create_test_actor, create_test_cause, create_test_game, eagle_hill,
};
use crate::{CoreError, GameCreation, apply_create_game};
use d8tl_audit::{AuditEvent, StateSnapshot};
use d8tl_domain::{DomainError, GameSetup, GameStatus};

fn create_test_setup() -> GameSetup {
    GameSetup {
        game_number: String::from("U12-101"),
        season_id: 1,
        division_id: 2,
        home_team_id: 10,
        away_team_id: 11,
        slot: eagle_hill(),
    }
}

#[test]
fn test_create_game_produces_audit_event_for_stored_game() {
    let creation: GameCreation =
        apply_create_game(create_test_setup(), create_test_actor(), create_test_cause()).unwrap();

    let event: AuditEvent = creation.into_audit_event(&create_test_game(GameStatus::Active));

    assert_eq!(event.game_id, GAME_ID);
    assert_eq!(event.action.name, "game_created");
    assert_eq!(event.before, StateSnapshot::NoGame);
    assert_eq!(event.after.slot(), Some(&eagle_hill()));
    assert_eq!(event.after.status(), Some(GameStatus::Active));
}

#[test]
fn test_create_game_rejects_blank_number() {
    let mut setup: GameSetup = create_test_setup();
    setup.game_number = String::new();

    let result = apply_create_game(setup, create_test_actor(), create_test_cause());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidGameNumber(_)))
    ));
}

#[test]
fn test_create_game_rejects_same_teams() {
    let mut setup: GameSetup = create_test_setup();
    setup.away_team_id = setup.home_team_id;

    let result = apply_create_game(setup, create_test_actor(), create_test_cause());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTeams { .. }))
    ));
}
