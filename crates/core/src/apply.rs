// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    Effect, GameCreation, GameState, ProposedChange, Review, ScheduleChangeNotification,
    TransitionResult,
};
use d8tl_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use d8tl_domain::{
    ChangeRequest, DomainError, Game, GameSetup, GameStatus, RequestStatus, RequestType,
    ScheduleSlot, WorkflowPolicy, validate_change, validate_reason, validate_requester,
    validate_score,
};

/// Validates a new game and prepares its creation audit record.
///
/// # Arguments
///
/// * `setup` - The game and its original schedule
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the game number is blank or a team would play itself.
pub fn apply_create_game(
    setup: GameSetup,
    actor: Actor,
    cause: Cause,
) -> Result<GameCreation, CoreError> {
    setup.validate()?;

    let action: Action = Action::new(
        String::from("game_created"),
        Some(format!(
            "Created game {} (team {} vs team {}) at {}",
            setup.game_number, setup.home_team_id, setup.away_team_id, setup.slot
        )),
    );

    Ok(GameCreation::new(setup, actor, cause, action))
}

/// Applies a command to a game, producing the writes and audit event.
///
/// # Arguments
///
/// * `state` - The game, its current schedule and any targeted request
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `policy` - Workflow options
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new game, effect and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The game's status forbids the command
/// - The targeted request is already finalized or was not loaded
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &GameState,
    command: Command,
    actor: Actor,
    cause: Cause,
    policy: WorkflowPolicy,
) -> Result<TransitionResult, CoreError> {
    let game: &Game = &state.game;
    let before: StateSnapshot = state.to_snapshot();

    match command {
        Command::SubmitChangeRequest {
            requested_by,
            request_type,
            requested,
            reason,
        } => {
            if !game.status.accepts_change_requests() {
                return Err(invalid_state(game, "submit change request"));
            }
            validate_requester(&requested_by)?;
            validate_reason(&reason)?;

            let original: ScheduleSlot = state.current.slot.clone();
            let requested: ScheduleSlot = match (request_type, requested) {
                (RequestType::Cancel, _) => {
                    ScheduleSlot::cancelled(original.date(), original.time())
                }
                (_, Some(slot)) => slot,
                (_, None) => {
                    return Err(DomainError::MissingRequestedSchedule { request_type }.into());
                }
            };
            validate_change(game.game_id, request_type, &original, &requested)?;

            let action: Action = Action::new(
                String::from("schedule_change_submitted"),
                Some(format!(
                    "{request_type} requested by {requested_by}: {original} -> {requested}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before.clone(),
                before,
            );

            Ok(TransitionResult {
                new_game: game.clone(),
                effect: Effect::SubmitRequest(ProposedChange {
                    game_id: game.game_id,
                    requested_by: requested_by.trim().to_string(),
                    request_type,
                    original,
                    requested,
                    reason: reason.trim().to_string(),
                }),
                audit_event,
                notification: None,
            })
        }
        Command::ApproveChangeRequest {
            request_id,
            reviewed_by,
            review_notes,
        } => {
            let request: &ChangeRequest = pending_request(state, request_id)?;
            let new_status: GameStatus = approved_game_status(game, request, policy)?;

            let slot: ScheduleSlot = approved_slot(state, request)?;

            let mut new_game: Game = game.clone();
            new_game.status = new_status;

            let action: Action = Action::new(
                String::from("schedule_change_approved"),
                Some(format!(
                    "{} request {request_id} approved by {reviewed_by}: {} -> {slot}",
                    request.request_type, state.current.slot
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before,
                StateSnapshot::of(&new_game, &slot),
            );

            Ok(TransitionResult {
                new_game,
                effect: Effect::ApproveRequest {
                    review: Review {
                        request_id,
                        status: RequestStatus::Approved,
                        reviewed_by,
                        review_notes,
                    },
                    slot,
                    notes: Some(request.reason.clone()),
                },
                audit_event,
                notification: Some(ScheduleChangeNotification {
                    game_id: game.game_id,
                    request_id,
                    request_type: request.request_type,
                    outcome: RequestStatus::Approved,
                }),
            })
        }
        Command::DenyChangeRequest {
            request_id,
            reviewed_by,
            review_notes,
        } => {
            let request: &ChangeRequest = pending_request(state, request_id)?;

            let action: Action = Action::new(
                String::from("schedule_change_denied"),
                Some(format!(
                    "{} request {request_id} denied by {reviewed_by}",
                    request.request_type
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before.clone(),
                before,
            );

            Ok(TransitionResult {
                new_game: game.clone(),
                effect: Effect::FinalizeRequest(Review {
                    request_id,
                    status: RequestStatus::Denied,
                    reviewed_by,
                    review_notes,
                }),
                audit_event,
                notification: Some(ScheduleChangeNotification {
                    game_id: game.game_id,
                    request_id,
                    request_type: request.request_type,
                    outcome: RequestStatus::Denied,
                }),
            })
        }
        Command::WithdrawChangeRequest {
            request_id,
            withdrawn_by,
        } => {
            let request: &ChangeRequest = pending_request(state, request_id)?;

            let action: Action = Action::new(
                String::from("schedule_change_withdrawn"),
                Some(format!(
                    "{} request {request_id} withdrawn by {withdrawn_by}",
                    request.request_type
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before.clone(),
                before,
            );

            Ok(TransitionResult {
                new_game: game.clone(),
                effect: Effect::FinalizeRequest(Review {
                    request_id,
                    status: RequestStatus::Cancelled,
                    reviewed_by: withdrawn_by,
                    review_notes: None,
                }),
                audit_event,
                notification: None,
            })
        }
        Command::RecordScore {
            home_score,
            away_score,
        } => {
            if !game.status.accepts_scores() {
                return Err(invalid_state(game, "record score"));
            }
            validate_score(home_score, away_score)?;

            let mut new_game: Game = game.clone();
            new_game.home_score = Some(home_score);
            new_game.away_score = Some(away_score);
            new_game.status = GameStatus::Completed;

            let action: Action = Action::new(
                String::from("score_recorded"),
                Some(format!("Final score {home_score}-{away_score}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before,
                StateSnapshot::of(&new_game, &state.current.slot),
            );

            Ok(TransitionResult {
                new_game,
                effect: Effect::UpdateGame,
                audit_event,
                notification: None,
            })
        }
        Command::ClearScore => {
            if game.status != GameStatus::Completed {
                return Err(invalid_state(game, "clear score"));
            }

            let mut new_game: Game = game.clone();
            new_game.home_score = None;
            new_game.away_score = None;
            new_game.status = GameStatus::Active;

            let action: Action = Action::new(String::from("score_cleared"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before,
                StateSnapshot::of(&new_game, &state.current.slot),
            );

            Ok(TransitionResult {
                new_game,
                effect: Effect::UpdateGame,
                audit_event,
                notification: None,
            })
        }
        Command::PostponeGame { reason } => {
            if game.status != GameStatus::Active {
                return Err(invalid_state(game, "postpone game"));
            }
            game.status.validate_transition(GameStatus::Postponed)?;

            let mut new_game: Game = game.clone();
            new_game.status = GameStatus::Postponed;

            let action: Action = Action::new(String::from("game_postponed"), reason);
            let audit_event: AuditEvent = AuditEvent::new(
                game.game_id,
                actor,
                cause,
                action,
                before,
                StateSnapshot::of(&new_game, &state.current.slot),
            );

            Ok(TransitionResult {
                new_game,
                effect: Effect::UpdateGame,
                audit_event,
                notification: None,
            })
        }
    }
}

const fn invalid_state(game: &Game, operation: &'static str) -> CoreError {
    CoreError::DomainViolation(DomainError::InvalidGameState {
        game_id: game.game_id,
        status: game.status,
        operation,
    })
}

/// Returns the targeted request, which must belong to the game and be pending.
fn pending_request(state: &GameState, request_id: i64) -> Result<&ChangeRequest, CoreError> {
    let request: &ChangeRequest = state
        .request
        .as_ref()
        .filter(|r| r.request_id == Some(request_id))
        .ok_or(CoreError::RequestNotLoaded { request_id })?;

    if request.game_id != state.game.game_id {
        return Err(DomainError::RequestGameMismatch {
            request_id,
            game_id: state.game.game_id,
        }
        .into());
    }
    if request.status.is_terminal() {
        return Err(DomainError::AlreadyFinalized {
            request_id,
            status: request.status,
        }
        .into());
    }
    Ok(request)
}

/// Decides the game's status after `request` is approved.
/// Resolves the slot an approval writes to the ledger.
///
/// A reschedule names its full target. Location changes and cancellations
/// only replace the venue, so they keep the date and time that are current
/// at approval, not the ones seen at submission.
fn approved_slot(state: &GameState, request: &ChangeRequest) -> Result<ScheduleSlot, CoreError> {
    let current: &ScheduleSlot = &state.current.slot;
    let slot: ScheduleSlot = match request.request_type {
        RequestType::Reschedule => request.requested.clone(),
        RequestType::LocationChange => {
            ScheduleSlot::new(current.date(), current.time(), request.requested.location())?
        }
        RequestType::Cancel => ScheduleSlot::cancelled(current.date(), current.time()),
    };
    if &slot == current {
        return Err(DomainError::NoChange {
            game_id: state.game.game_id,
        }
        .into());
    }
    Ok(slot)
}

fn approved_game_status(
    game: &Game,
    request: &ChangeRequest,
    policy: WorkflowPolicy,
) -> Result<GameStatus, CoreError> {
    let target: GameStatus = match (request.request_type, game.status) {
        (RequestType::Cancel, GameStatus::Active | GameStatus::Postponed) => GameStatus::Cancelled,
        (_, GameStatus::Active) => GameStatus::Active,
        (RequestType::Reschedule | RequestType::LocationChange, GameStatus::Postponed) => {
            GameStatus::Active
        }
        (RequestType::Reschedule | RequestType::LocationChange, GameStatus::Cancelled)
            if policy.reopen_on_reschedule =>
        {
            GameStatus::Active
        }
        (_, GameStatus::Cancelled | GameStatus::Completed) => {
            return Err(invalid_state(game, "approve change request"));
        }
    };

    if target != game.status {
        game.status.validate_transition(target)?;
    }
    Ok(target)
}
