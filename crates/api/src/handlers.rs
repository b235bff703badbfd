// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler authorizes first, then calls into persistence. State
//! changes run through `Persistence::execute`, so a handler either commits
//! everything or nothing.

use std::str::FromStr;

use d8tl::Command;
use d8tl_audit::{AuditEvent, Cause};
use d8tl_domain::{
    ChangeRequest, Game, GameSetup, HistoryEntry, RequestStatus, RequestType, ScheduleSlot,
};
use d8tl_persistence::{
    CommandOutcome, ConsistencyReport, GameCreated, GameSchedule, Persistence, RequestFilter,
};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::notification::NotificationSink;
use crate::request_response::{
    AuditEventInfo, ChangeRequestInfo, ClearScoreRequest, ConsistencyCheckResponse,
    CreateGameRequest, CreateGameResponse, GameInfo, GameStatusResponse, GetAuditLogResponse,
    GetGameScheduleResponse, HistoryEntryInfo, ListChangeRequestsRequest,
    ListChangeRequestsResponse, ListGamesResponse, ListScheduleHistoryResponse,
    PostponeGameRequest, RecordScoreRequest, ReviewScheduleChangeRequest,
    ReviewScheduleChangeResponse, ScheduleInfo, SubmitScheduleChangeRequest,
    SubmitScheduleChangeResponse, WithdrawScheduleChangeRequest, WithdrawScheduleChangeResponse,
};

/// Creates a game and its original schedule.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The game to create
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The date, time or location is invalid
/// - The game number is already in use
pub fn create_game(
    persistence: &mut Persistence,
    request: &CreateGameRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateGameResponse, ApiError> {
    AuthorizationService::authorize_create_game(authenticated_actor)?;

    let slot: ScheduleSlot =
        ScheduleSlot::parse(&request.game_date, &request.game_time, &request.location)
            .map_err(translate_domain_error)?;
    let setup: GameSetup = GameSetup {
        game_number: request.game_number.clone(),
        season_id: request.season_id,
        division_id: request.division_id,
        home_team_id: request.home_team_id,
        away_team_id: request.away_team_id,
        slot,
    };

    let created: GameCreated = persistence
        .create_game(setup, authenticated_actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    info!(
        game_id = created.game.game_id,
        game_number = %created.game.game_number,
        actor = %authenticated_actor.id,
        "Game created via API"
    );

    Ok(CreateGameResponse {
        game: GameInfo::from(&created.game),
        schedule: ScheduleInfo::from(&created.original.slot),
        message: format!("Game {} created", created.game.game_number),
    })
}

/// Submits a schedule change request on behalf of the authenticated actor.
///
/// The actor's id is recorded as the requester.
///
/// # Errors
///
/// Returns an error if:
/// - The request type or proposed schedule cannot be parsed
/// - The game does not exist or does not accept change requests
/// - The proposed schedule is identical to the current one
pub fn submit_schedule_change(
    persistence: &mut Persistence,
    request: &SubmitScheduleChangeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SubmitScheduleChangeResponse, ApiError> {
    AuthorizationService::authorize_submit_request(authenticated_actor)?;

    let request_type: RequestType =
        RequestType::from_str(&request.request_type).map_err(translate_domain_error)?;
    let requested: Option<ScheduleSlot> = if request_type.is_cancel() {
        None
    } else {
        parse_requested_slot(request)?
    };

    let command: Command = Command::SubmitChangeRequest {
        requested_by: authenticated_actor.id.clone(),
        request_type,
        requested,
        reason: request.reason.clone(),
    };
    let outcome: CommandOutcome = persistence
        .execute(
            request.game_id,
            command,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_persistence_error)?;

    let change_request: ChangeRequestInfo = stored_request(outcome.request.as_ref())?;
    info!(
        game_id = request.game_id,
        request_id = change_request.request_id,
        request_type = %request_type,
        actor = %authenticated_actor.id,
        "Schedule change submitted"
    );

    Ok(SubmitScheduleChangeResponse {
        message: format!(
            "{} request {} submitted for game {}",
            request_type, change_request.request_id, request.game_id
        ),
        request: change_request,
    })
}

/// Approves a pending change request and applies it to the schedule.
///
/// On success the notification sink receives the outcome. The sink is
/// called after the transaction commits.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The request does not exist or is no longer pending
/// - The game's status does not permit the change
pub fn approve_schedule_change(
    persistence: &mut Persistence,
    notifications: &dyn NotificationSink,
    request: &ReviewScheduleChangeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReviewScheduleChangeResponse, ApiError> {
    AuthorizationService::authorize_review_request(authenticated_actor)?;

    let command: Command = Command::ApproveChangeRequest {
        request_id: request.request_id,
        reviewed_by: authenticated_actor.id.clone(),
        review_notes: request.review_notes.clone(),
    };
    review(
        persistence,
        notifications,
        request.request_id,
        command,
        authenticated_actor,
        cause,
    )
}

/// Denies a pending change request. The schedule is not touched.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The request does not exist or is no longer pending
pub fn deny_schedule_change(
    persistence: &mut Persistence,
    notifications: &dyn NotificationSink,
    request: &ReviewScheduleChangeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReviewScheduleChangeResponse, ApiError> {
    AuthorizationService::authorize_review_request(authenticated_actor)?;

    let command: Command = Command::DenyChangeRequest {
        request_id: request.request_id,
        reviewed_by: authenticated_actor.id.clone(),
        review_notes: request.review_notes.clone(),
    };
    review(
        persistence,
        notifications,
        request.request_id,
        command,
        authenticated_actor,
        cause,
    )
}

fn review(
    persistence: &mut Persistence,
    notifications: &dyn NotificationSink,
    request_id: i64,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReviewScheduleChangeResponse, ApiError> {
    let game_id: i64 = persistence
        .get_change_request(request_id)
        .map_err(translate_persistence_error)?
        .game_id;

    let outcome: CommandOutcome = persistence
        .execute(game_id, command, authenticated_actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    if let Some(notification) = &outcome.notification {
        notifications.notify(notification);
    }

    let change_request: ChangeRequestInfo = stored_request(outcome.request.as_ref())?;
    info!(
        game_id,
        request_id,
        status = %change_request.status,
        actor = %authenticated_actor.id,
        "Schedule change reviewed"
    );

    Ok(ReviewScheduleChangeResponse {
        message: format!("Change request {request_id} {}", change_request.status),
        request: change_request,
        game: GameInfo::from(&outcome.game),
        version_number: outcome.entry.as_ref().map(|entry| entry.version_number),
        schedule: outcome
            .entry
            .as_ref()
            .map(|entry| ScheduleInfo::from(&entry.slot)),
    })
}

/// Withdraws a pending change request.
///
/// Coaches may withdraw only their own requests.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist or is no longer pending
/// - A coach tries to withdraw another actor's request
pub fn withdraw_schedule_change(
    persistence: &mut Persistence,
    request: &WithdrawScheduleChangeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<WithdrawScheduleChangeResponse, ApiError> {
    let existing: ChangeRequest = persistence
        .get_change_request(request.request_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_withdraw_request(authenticated_actor, &existing)?;

    let command: Command = Command::WithdrawChangeRequest {
        request_id: request.request_id,
        withdrawn_by: authenticated_actor.id.clone(),
    };
    let outcome: CommandOutcome = persistence
        .execute(
            existing.game_id,
            command,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_persistence_error)?;

    Ok(WithdrawScheduleChangeResponse {
        request: stored_request(outcome.request.as_ref())?,
        message: format!("Change request {} withdrawn", request.request_id),
    })
}

/// Records a final score, completing the game.
///
/// # Errors
///
/// Returns an error if the game does not exist, a score is negative or the
/// game is cancelled or postponed.
pub fn record_score(
    persistence: &mut Persistence,
    request: &RecordScoreRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GameStatusResponse, ApiError> {
    AuthorizationService::authorize_record_score(authenticated_actor)?;

    let command: Command = Command::RecordScore {
        home_score: request.home_score,
        away_score: request.away_score,
    };
    let game: Game = execute_game_command(
        persistence,
        request.game_id,
        command,
        authenticated_actor,
        cause,
    )?;

    Ok(GameStatusResponse {
        message: format!(
            "Score {}-{} recorded for game {}",
            request.home_score, request.away_score, game.game_number
        ),
        game: GameInfo::from(&game),
    })
}

/// Clears a recorded score, returning the game to active.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the game is not
/// completed.
pub fn clear_score(
    persistence: &mut Persistence,
    request: &ClearScoreRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GameStatusResponse, ApiError> {
    AuthorizationService::authorize_clear_score(authenticated_actor)?;

    let game: Game = execute_game_command(
        persistence,
        request.game_id,
        Command::ClearScore,
        authenticated_actor,
        cause,
    )?;

    Ok(GameStatusResponse {
        message: format!("Score cleared for game {}", game.game_number),
        game: GameInfo::from(&game),
    })
}

/// Postpones an active game.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the game is not active.
pub fn postpone_game(
    persistence: &mut Persistence,
    request: &PostponeGameRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GameStatusResponse, ApiError> {
    AuthorizationService::authorize_postpone_game(authenticated_actor)?;

    let command: Command = Command::PostponeGame {
        reason: request.reason.clone(),
    };
    let game: Game = execute_game_command(
        persistence,
        request.game_id,
        command,
        authenticated_actor,
        cause,
    )?;

    Ok(GameStatusResponse {
        message: format!("Game {} postponed", game.game_number),
        game: GameInfo::from(&game),
    })
}

fn execute_game_command(
    persistence: &mut Persistence,
    game_id: i64,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<Game, ApiError> {
    let outcome: CommandOutcome = persistence
        .execute(game_id, command, authenticated_actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;
    info!(
        game_id,
        status = %outcome.game.status,
        actor = %authenticated_actor.id,
        "Game updated via API"
    );
    Ok(outcome.game)
}

/// Lists every game.
///
/// # Errors
///
/// Returns an error if the games cannot be loaded.
pub fn list_games(persistence: &mut Persistence) -> Result<ListGamesResponse, ApiError> {
    let games: Vec<Game> = persistence
        .list_games()
        .map_err(translate_persistence_error)?;
    Ok(ListGamesResponse {
        games: games.iter().map(GameInfo::from).collect(),
    })
}

/// Returns a game's current schedule.
///
/// The schedule record is verified against the history ledger. An
/// inconsistent game is refused rather than rendered.
///
/// # Errors
///
/// Returns an error if the game does not exist or its schedule record and
/// history disagree.
pub fn get_game_schedule(
    persistence: &mut Persistence,
    game_id: i64,
) -> Result<GetGameScheduleResponse, ApiError> {
    let schedule: GameSchedule = persistence
        .get_game_schedule(game_id)
        .map_err(translate_persistence_error)?;

    Ok(GetGameScheduleResponse {
        game: GameInfo::from(&schedule.game),
        schedule: ScheduleInfo::from(&schedule.record.slot),
        version_number: schedule.current.version_number,
        schedule_type: schedule.current.schedule_type.to_string(),
    })
}

/// Returns every schedule version of a game, oldest first.
///
/// # Errors
///
/// Returns an error if the game does not exist.
pub fn list_schedule_history(
    persistence: &mut Persistence,
    game_id: i64,
) -> Result<ListScheduleHistoryResponse, ApiError> {
    let versions: Vec<HistoryEntry> = persistence
        .list_versions(game_id)
        .map_err(translate_persistence_error)?;

    Ok(ListScheduleHistoryResponse {
        game_id,
        entries: versions.iter().map(HistoryEntryInfo::from).collect(),
    })
}

/// Lists change requests, optionally restricted to one game and/or status.
///
/// # Errors
///
/// Returns an error if the status filter is not a known request status.
pub fn list_change_requests(
    persistence: &mut Persistence,
    request: &ListChangeRequestsRequest,
) -> Result<ListChangeRequestsResponse, ApiError> {
    let status: Option<RequestStatus> = request
        .status
        .as_deref()
        .map(RequestStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;
    let filter: RequestFilter = RequestFilter {
        game_id: request.game_id,
        status,
    };

    let requests: Vec<ChangeRequest> = persistence
        .list_change_requests(filter)
        .map_err(translate_persistence_error)?;

    Ok(ListChangeRequestsResponse {
        requests: requests
            .iter()
            .filter_map(ChangeRequestInfo::from_stored)
            .collect(),
    })
}

/// Returns a game's audit log, oldest first.
///
/// # Errors
///
/// Returns an error if the game does not exist.
pub fn get_game_audit_log(
    persistence: &mut Persistence,
    game_id: i64,
) -> Result<GetAuditLogResponse, ApiError> {
    persistence
        .get_game(game_id)
        .map_err(translate_persistence_error)?;
    let events: Vec<AuditEvent> = persistence
        .list_audit_events(game_id)
        .map_err(translate_persistence_error)?;

    Ok(GetAuditLogResponse {
        game_id,
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

/// Runs the consistency check over every game.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the stored data cannot
/// be read.
pub fn check_consistency(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ConsistencyCheckResponse, ApiError> {
    AuthorizationService::authorize_check_consistency(authenticated_actor)?;

    let report: ConsistencyReport = persistence
        .check_consistency()
        .map_err(translate_persistence_error)?;
    if !report.is_consistent() {
        warn!(
            violations = report.violations.len(),
            "Consistency check found violations"
        );
    }

    Ok(ConsistencyCheckResponse {
        games_checked: report.games_checked,
        consistent: report.is_consistent(),
        violations: report.violations.iter().map(ToString::to_string).collect(),
    })
}

/// Parses the proposed schedule of a non-cancel submission.
///
/// Returns `None` when no field is given so the state machine can report the
/// missing schedule for the request type.
fn parse_requested_slot(
    request: &SubmitScheduleChangeRequest,
) -> Result<Option<ScheduleSlot>, ApiError> {
    match (
        request.game_date.as_deref(),
        request.game_time.as_deref(),
        request.location.as_deref(),
    ) {
        (None, None, None) => Ok(None),
        (Some(date), Some(time), Some(location)) => ScheduleSlot::parse(date, time, location)
            .map(Some)
            .map_err(translate_domain_error),
        (date, time, _) => {
            let field: &str = if date.is_none() {
                "game_date"
            } else if time.is_none() {
                "game_time"
            } else {
                "location"
            };
            Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: String::from(
                    "A proposed schedule needs a date, a time and a location",
                ),
            })
        }
    }
}

fn stored_request(request: Option<&ChangeRequest>) -> Result<ChangeRequestInfo, ApiError> {
    request
        .and_then(ChangeRequestInfo::from_stored)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Workflow did not return the stored change request"),
        })
}
