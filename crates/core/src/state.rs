// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use d8tl_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use d8tl_domain::{
    ChangeRequest, Game, GameSetup, HistoryEntry, RequestStatus, RequestType, ScheduleSlot,
};

/// The state a command is applied to: one game and its current schedule.
///
/// Commands that act on a change request also carry that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The game.
    pub game: Game,
    /// The history entry currently flagged current.
    pub current: HistoryEntry,
    /// The change request a command targets, if any.
    pub request: Option<ChangeRequest>,
}

impl GameState {
    /// Creates a new game state.
    ///
    /// # Arguments
    ///
    /// * `game` - The game
    /// * `current` - The game's current history entry
    #[must_use]
    pub const fn new(game: Game, current: HistoryEntry) -> Self {
        Self {
            game,
            current,
            request: None,
        }
    }

    /// Attaches the change request a command will act on.
    #[must_use]
    pub fn with_request(self, request: ChangeRequest) -> Self {
        Self {
            request: Some(request),
            ..self
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::of(&self.game, &self.current.slot)
    }
}

/// A validated request that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedChange {
    pub game_id: i64,
    pub requested_by: String,
    pub request_type: RequestType,
    pub original: ScheduleSlot,
    pub requested: ScheduleSlot,
    pub reason: String,
}

/// The terminal status a pending request moves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub request_id: i64,
    pub status: RequestStatus,
    pub reviewed_by: String,
    pub review_notes: Option<String>,
}

/// What must be written for a transition to take effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Store a new pending request.
    SubmitRequest(ProposedChange),
    /// Finalize a request without touching the schedule.
    FinalizeRequest(Review),
    /// Finalize a request as approved, append a history entry with `slot`,
    /// rewrite the schedule record, then store the new game status.
    ApproveRequest {
        review: Review,
        slot: ScheduleSlot,
        notes: Option<String>,
    },
    /// Store the new game row only.
    UpdateGame,
}

/// Event handed to the notification module after a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleChangeNotification {
    pub game_id: i64,
    pub request_id: i64,
    pub request_type: RequestType,
    /// `Approved` or `Denied`.
    pub outcome: RequestStatus,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The game after the transition.
    pub new_game: Game,
    /// The writes that realize the transition.
    pub effect: Effect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Notification to emit once the transition is committed.
    pub notification: Option<ScheduleChangeNotification>,
}

/// A validated game creation, waiting for its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCreation {
    /// The validated setup.
    pub setup: GameSetup,
    actor: Actor,
    cause: Cause,
    action: Action,
}

impl GameCreation {
    pub(crate) const fn new(setup: GameSetup, actor: Actor, cause: Cause, action: Action) -> Self {
        Self {
            setup,
            actor,
            cause,
            action,
        }
    }

    /// Builds the audit event once the game has been assigned an id.
    ///
    /// # Arguments
    ///
    /// * `game` - The newly stored game
    #[must_use]
    pub fn into_audit_event(self, game: &Game) -> AuditEvent {
        AuditEvent::new(
            game.game_id,
            self.actor,
            self.cause,
            self.action,
            StateSnapshot::NoGame,
            StateSnapshot::of(game, &self.setup.slot),
        )
    }
}
