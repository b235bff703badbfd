// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` and times as `HH:MM` strings. A cancelled
//! game's schedule carries the `CANCELLED` location.

use d8tl_audit::{AuditEvent, GameSnapshot};
use d8tl_domain::{ChangeRequest, Game, HistoryEntry, ScheduleSlot};
use serde::{Deserialize, Serialize};

/// API request to create a game with its original schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// External-facing game label, unique across the league.
    pub game_number: String,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub game_date: String,
    pub game_time: String,
    pub location: String,
}

/// API response for a successful game creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game: GameInfo,
    /// The original schedule, stored as history version 1.
    pub schedule: ScheduleInfo,
    /// A success message.
    pub message: String,
}

/// A game as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: i64,
    pub game_number: String,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    /// `Active`, `Completed`, `Cancelled` or `Postponed`.
    pub status: String,
}

impl From<&Game> for GameInfo {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.game_id,
            game_number: game.game_number.clone(),
            season_id: game.season_id,
            division_id: game.division_id,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            home_score: game.home_score,
            away_score: game.away_score,
            status: game.status.to_string(),
        }
    }
}

/// A date/time/location snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub game_date: String,
    pub game_time: String,
    pub location: String,
    pub is_cancelled: bool,
}

impl From<&ScheduleSlot> for ScheduleInfo {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            game_date: slot.date_string(),
            game_time: slot.time_string(),
            location: slot.location().to_string(),
            is_cancelled: slot.is_cancellation(),
        }
    }
}

/// API request to submit a schedule change request.
///
/// The proposed date, time and location are required for `Reschedule` and
/// `Location Change` and ignored for `Cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScheduleChangeRequest {
    pub game_id: i64,
    /// `Reschedule`, `Location Change` or `Cancel`.
    pub request_type: String,
    pub game_date: Option<String>,
    pub game_time: Option<String>,
    pub location: Option<String>,
    pub reason: String,
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScheduleChangeResponse {
    pub request: ChangeRequestInfo,
    /// A success message.
    pub message: String,
}

/// A schedule change request as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequestInfo {
    pub request_id: i64,
    pub game_id: i64,
    pub requested_by: String,
    pub request_type: String,
    /// The schedule that was current at submission time.
    pub original: ScheduleInfo,
    pub requested: ScheduleInfo,
    pub reason: String,
    /// `Pending`, `Approved`, `Denied` or `Cancelled`.
    pub status: String,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    pub created_at: String,
    pub reviewed_at: Option<String>,
}

impl ChangeRequestInfo {
    /// Builds the DTO for a stored change request.
    ///
    /// Returns `None` if the request has not been persisted.
    #[must_use]
    pub fn from_stored(request: &ChangeRequest) -> Option<Self> {
        Some(Self {
            request_id: request.request_id?,
            game_id: request.game_id,
            requested_by: request.requested_by.clone(),
            request_type: request.request_type.to_string(),
            original: ScheduleInfo::from(&request.original),
            requested: ScheduleInfo::from(&request.requested),
            reason: request.reason.clone(),
            status: request.status.to_string(),
            reviewed_by: request.reviewed_by.clone(),
            review_notes: request.review_notes.clone(),
            created_at: request.created_at.clone(),
            reviewed_at: request.reviewed_at.clone(),
        })
    }
}

/// API request to approve or deny a pending change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewScheduleChangeRequest {
    pub request_id: i64,
    pub review_notes: Option<String>,
}

/// API response for an approval or denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewScheduleChangeResponse {
    /// The finalized request.
    pub request: ChangeRequestInfo,
    pub game: GameInfo,
    /// The new current history version. `None` for denials.
    pub version_number: Option<u32>,
    /// The schedule now in effect. `None` for denials.
    pub schedule: Option<ScheduleInfo>,
    /// A success message.
    pub message: String,
}

/// API request to withdraw a pending change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawScheduleChangeRequest {
    pub request_id: i64,
}

/// API response for a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawScheduleChangeResponse {
    pub request: ChangeRequestInfo,
    /// A success message.
    pub message: String,
}

/// API request to record a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordScoreRequest {
    pub game_id: i64,
    pub home_score: i32,
    pub away_score: i32,
}

/// API request to clear a recorded score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearScoreRequest {
    pub game_id: i64,
}

/// API request to postpone a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostponeGameRequest {
    pub game_id: i64,
    pub reason: Option<String>,
}

/// API response for score and status changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub game: GameInfo,
    /// A success message.
    pub message: String,
}

/// API response for a game's current schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGameScheduleResponse {
    pub game: GameInfo,
    pub schedule: ScheduleInfo,
    /// The current history version backing `schedule`.
    pub version_number: u32,
    /// `Original` or `Changed`.
    pub schedule_type: String,
}

/// API response listing every game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGamesResponse {
    pub games: Vec<GameInfo>,
}

/// One schedule history version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    pub version_number: u32,
    pub schedule_type: String,
    pub schedule: ScheduleInfo,
    pub is_current: bool,
    pub change_request_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<&HistoryEntry> for HistoryEntryInfo {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            version_number: entry.version_number,
            schedule_type: entry.schedule_type.to_string(),
            schedule: ScheduleInfo::from(&entry.slot),
            is_current: entry.is_current,
            change_request_id: entry.change_request_id,
            notes: entry.notes.clone(),
            created_at: entry.created_at.clone(),
        }
    }
}

/// API response for a game's full schedule history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScheduleHistoryResponse {
    pub game_id: i64,
    pub entries: Vec<HistoryEntryInfo>,
}

/// API request to list change requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListChangeRequestsRequest {
    /// Restrict to one game.
    pub game_id: Option<i64>,
    /// Restrict to one status.
    pub status: Option<String>,
}

/// API response listing change requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListChangeRequestsResponse {
    pub requests: Vec<ChangeRequestInfo>,
}

/// A game as recorded by one side of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshotInfo {
    pub game_number: String,
    pub status: String,
    pub schedule: ScheduleInfo,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl From<&GameSnapshot> for GameSnapshotInfo {
    fn from(game: &GameSnapshot) -> Self {
        Self {
            game_number: game.game_number.clone(),
            status: game.status.to_string(),
            schedule: ScheduleInfo::from(&game.slot),
            home_score: game.home_score,
            away_score: game.away_score,
        }
    }
}

/// One audit log entry.
///
/// `before` is `None` for the event that created the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub before: Option<GameSnapshotInfo>,
    pub after: Option<GameSnapshotInfo>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.game().map(GameSnapshotInfo::from),
            after: event.after.game().map(GameSnapshotInfo::from),
        }
    }
}

/// API response for a game's audit log, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAuditLogResponse {
    pub game_id: i64,
    pub events: Vec<AuditEventInfo>,
}

/// API response for the consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyCheckResponse {
    pub games_checked: usize,
    pub consistent: bool,
    /// One human-readable line per violation.
    pub violations: Vec<String>,
}
