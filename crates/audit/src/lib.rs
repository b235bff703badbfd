// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use d8tl_domain::{Game, GameStatus, ScheduleSlot};

/// The entity performing an action.
///
/// An actor is a coach or admin acting through the API, or the system
/// itself (for example the consistency job).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "coach", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., HTTP request id).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`schedule_change_approved`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A game as recorded on one side of an audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub game_number: String,
    pub status: GameStatus,
    /// The schedule that was current when the snapshot was taken.
    pub slot: ScheduleSlot,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

/// The state of a game before or after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateSnapshot {
    /// The game did not exist yet.
    NoGame,
    /// The game with its current schedule.
    Game(GameSnapshot),
}

impl StateSnapshot {
    /// Captures a game together with the schedule that is current for it.
    ///
    /// # Arguments
    ///
    /// * `game` - The game
    /// * `slot` - Its current schedule
    #[must_use]
    pub fn of(game: &Game, slot: &ScheduleSlot) -> Self {
        Self::Game(GameSnapshot {
            game_number: game.game_number.clone(),
            status: game.status,
            slot: slot.clone(),
            home_score: game.home_score,
            away_score: game.away_score,
        })
    }

    /// Returns the captured game, if there was one.
    #[must_use]
    pub const fn game(&self) -> Option<&GameSnapshot> {
        match self {
            Self::NoGame => None,
            Self::Game(game) => Some(game),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<GameStatus> {
        self.game().map(|game| game.status)
    }

    #[must_use]
    pub fn slot(&self) -> Option<&ScheduleSlot> {
        self.game().map(|game| &game.slot)
    }
}

impl std::fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoGame => write!(f, "game=none"),
            Self::Game(game) => {
                write!(
                    f,
                    "game={},status={},schedule={},score=",
                    game.game_number, game.status, game.slot
                )?;
                match (game.home_score, game.away_score) {
                    (Some(home), Some(away)) => write!(f, "{home}-{away}"),
                    _ => write!(f, "none"),
                }
            }
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change produces exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The game state before and after the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The persisted event id. `None` until stored.
    pub event_id: Option<i64>,
    /// The game this event concerns.
    pub game_id: i64,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `game_id` - The game the event concerns
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        game_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            game_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns the same event carrying its persisted id.
    #[must_use]
    pub fn with_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }

    /// Returns true if this event has been stored.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.event_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn create_test_game(status: GameStatus) -> Game {
        Game {
            game_id: 42,
            game_number: String::from("U12-101"),
            season_id: 2024,
            division_id: 3,
            home_team_id: 21,
            away_team_id: 22,
            home_score: None,
            away_score: None,
            status,
        }
    }

    fn eagle_hill() -> ScheduleSlot {
        ScheduleSlot::new(date!(2024 - 07 - 15), time!(18:00), "Eagle Hill MS").unwrap()
    }

    fn create_test_event() -> AuditEvent {
        let slot: ScheduleSlot = eagle_hill();
        AuditEvent::new(
            42,
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-456"), String::from("Admin review")),
            Action::new(
                String::from("schedule_change_approved"),
                Some(String::from("request 3")),
            ),
            StateSnapshot::of(&create_test_game(GameStatus::Active), &slot),
            StateSnapshot::of(
                &create_test_game(GameStatus::Cancelled),
                &ScheduleSlot::cancelled(slot.date(), slot.time()),
            ),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("coach-7"), String::from("coach"));

        assert_eq!(actor.id, "coach-7");
        assert_eq!(actor.actor_type, "coach");
    }

    #[test]
    fn test_action_details_are_optional() {
        let action: Action = Action::new(String::from("game_created"), None);

        assert_eq!(action.name, "game_created");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_new_event_is_not_persisted() {
        let event: AuditEvent = create_test_event();

        assert_eq!(event.game_id, 42);
        assert!(!event.is_persisted());
        assert_eq!(event.before.status(), Some(GameStatus::Active));
        assert_eq!(event.after.status(), Some(GameStatus::Cancelled));
        assert!(event.after.slot().unwrap().is_cancellation());
    }

    #[test]
    fn test_with_id_keeps_content() {
        let event: AuditEvent = create_test_event();
        let stored: AuditEvent = event.clone().with_id(9);

        assert_eq!(stored.event_id, Some(9));
        assert_eq!(stored.action, event.action);
        assert_eq!(stored.actor, event.actor);
        assert_eq!(stored.after, event.after);
    }

    #[test]
    fn test_no_game_snapshot_has_no_fields() {
        let snapshot: StateSnapshot = StateSnapshot::NoGame;

        assert_eq!(snapshot.game(), None);
        assert_eq!(snapshot.status(), None);
        assert_eq!(snapshot.slot(), None);
        assert_eq!(snapshot.to_string(), "game=none");
    }

    #[test]
    fn test_snapshot_copies_game_and_slot() {
        let mut game: Game = create_test_game(GameStatus::Completed);
        game.home_score = Some(7);
        game.away_score = Some(3);

        let snapshot: StateSnapshot = StateSnapshot::of(&game, &eagle_hill());
        let captured: &GameSnapshot = snapshot.game().unwrap();

        assert_eq!(captured.game_number, "U12-101");
        assert_eq!(captured.status, GameStatus::Completed);
        assert_eq!(captured.slot, eagle_hill());
        assert_eq!((captured.home_score, captured.away_score), (Some(7), Some(3)));
        assert_eq!(
            snapshot.to_string(),
            "game=U12-101,status=Completed,schedule=2024-07-15 18:00 @ Eagle Hill MS,score=7-3"
        );
    }
}
