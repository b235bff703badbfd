// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional command execution.
//!
//! These are the only writers of `schedules` and `schedule_history`. Each
//! runs in a single write transaction that first locks the game, so every
//! step either commits together or not at all.

use d8tl::{
    Command, Effect, GameCreation, GameState, ScheduleChangeNotification, TransitionResult,
    apply, apply_create_game,
};
use d8tl_audit::{Actor, AuditEvent, Cause};
use d8tl_domain::{ChangeRequest, Game, GameSetup, HistoryEntry, ScheduleRecord, WorkflowPolicy};
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::now_timestamp;
use crate::store::ScheduleStore;

/// What a committed game creation wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCreated {
    pub game: Game,
    pub record: ScheduleRecord,
    /// The version-1 history entry.
    pub original: HistoryEntry,
    pub event_id: i64,
}

/// What a committed command wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The game after the command.
    pub game: Game,
    /// The request the command created or finalized, as stored.
    pub request: Option<ChangeRequest>,
    /// The history entry appended by an approval.
    pub entry: Option<HistoryEntry>,
    pub event_id: i64,
    /// To be delivered by the caller now that the transaction has committed.
    pub notification: Option<ScheduleChangeNotification>,
}

/// Creates a game, its schedule record and its original history entry.
///
/// # Errors
///
/// Returns an error if the setup is invalid, the game number is taken, or
/// any write fails. Nothing is written on error.
pub fn create_game<C: ScheduleStore>(
    conn: &mut C,
    setup: GameSetup,
    actor: Actor,
    cause: Cause,
) -> Result<GameCreated, PersistenceError> {
    let creation: GameCreation = apply_create_game(setup, actor, cause)?;

    conn.write_transaction(|conn| {
        let game_number: &str = creation.setup.game_number.trim();
        if conn.find_game_by_number(game_number)?.is_some() {
            return Err(PersistenceError::DuplicateGameNumber(game_number.to_string()));
        }

        let now: String = now_timestamp()?;
        let game_id: i64 = conn.insert_game(&creation.setup, &now)?;
        conn.insert_schedule_record(game_id, &creation.setup.slot, &now)?;
        let original: HistoryEntry = conn.append_original(game_id, &creation.setup.slot, &now)?;

        let game: Game = conn
            .find_game(game_id)?
            .ok_or(PersistenceError::GameNotFound(game_id))?;
        let record: ScheduleRecord = ScheduleRecord {
            game_id,
            slot: creation.setup.slot.clone(),
        };

        let event: AuditEvent = creation.into_audit_event(&game);
        let event_id: i64 = conn.insert_audit_event(&event, &now)?;

        info!(game_id, game_number = %game.game_number, event_id, "Created game");

        Ok(GameCreated {
            game,
            record,
            original,
            event_id,
        })
    })
}

/// Applies a command to a game and writes its effects.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `game_id` - The game the command targets
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `policy` - Workflow options
///
/// # Errors
///
/// Returns `PersistenceError::GameNotFound` or
/// `PersistenceError::ChangeRequestNotFound` for unknown ids,
/// `PersistenceError::Rejected` if the command breaks a rule, and a
/// consistency or database error if the stored state is unusable. Nothing is
/// written on error.
pub fn execute<C: ScheduleStore>(
    conn: &mut C,
    game_id: i64,
    command: Command,
    actor: Actor,
    cause: Cause,
    policy: WorkflowPolicy,
) -> Result<CommandOutcome, PersistenceError> {
    conn.write_transaction(|conn| {
        let game: Game = conn
            .lock_game(game_id)?
            .ok_or(PersistenceError::GameNotFound(game_id))?
            .into_game()?;
        let current: HistoryEntry = conn.get_current(game_id)?;

        let mut state: GameState = GameState::new(game, current);
        if let Some(request_id) = command.target_request_id() {
            let request: ChangeRequest = conn.get_request(request_id)?;
            state = state.with_request(request);
        }

        let result: TransitionResult = apply(&state, command, actor, cause, policy)?;
        let now: String = now_timestamp()?;

        let (request, entry): (Option<ChangeRequest>, Option<HistoryEntry>) = match &result.effect
        {
            Effect::SubmitRequest(change) => {
                let request_id: i64 = conn.insert_request(change, &now)?;
                (Some(conn.get_request(request_id)?), None)
            }
            Effect::FinalizeRequest(review) => {
                conn.finalize_request(review, &now)?;
                (Some(conn.get_request(review.request_id)?), None)
            }
            Effect::ApproveRequest {
                review,
                slot,
                notes,
            } => {
                conn.finalize_request(review, &now)?;
                let entry: HistoryEntry = conn.append_change(
                    game_id,
                    slot,
                    review.request_id,
                    notes.as_deref(),
                    &now,
                )?;
                conn.update_schedule_record(game_id, &entry.slot, &now)?;
                conn.update_game(&result.new_game, &now)?;
                (Some(conn.get_request(review.request_id)?), Some(entry))
            }
            Effect::UpdateGame => {
                conn.update_game(&result.new_game, &now)?;
                (None, None)
            }
        };

        let event_id: i64 = conn.insert_audit_event(&result.audit_event, &now)?;

        info!(
            game_id,
            event_id,
            action = %result.audit_event.action.name,
            request_id = ?request.as_ref().and_then(|r| r.request_id),
            version = ?entry.as_ref().map(|e| e.version_number),
            "Applied command"
        );

        Ok(CommandOutcome {
            game: result.new_game,
            request,
            entry,
            event_id,
            notification: result.notification,
        })
    })
}
