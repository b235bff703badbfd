// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::change_request::{RequestStatus, RequestType};
use crate::game::GameStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Game number is empty or invalid.
    InvalidGameNumber(String),
    /// A game cannot be played by a team against itself.
    InvalidTeams {
        /// The home team.
        home_team_id: i64,
        /// The away team.
        away_team_id: i64,
    },
    /// Location is empty or uses a reserved value.
    InvalidLocation(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A score value is out of range.
    InvalidScore {
        /// The home score.
        home_score: i32,
        /// The away score.
        away_score: i32,
    },
    /// Change request reason is empty.
    InvalidReason(String),
    /// Requester identity is empty.
    InvalidRequester(String),
    /// Requested schedule is identical to the current one.
    NoChange {
        /// The game the request targets.
        game_id: i64,
    },
    /// A reschedule or location change request did not say where to move.
    MissingRequestedSchedule {
        /// The request type that needs a target schedule.
        request_type: RequestType,
    },
    /// A location change request attempted to move the date or time.
    LocationChangeAltersDateTime {
        /// The game the request targets.
        game_id: i64,
    },
    /// The game's status does not permit the operation.
    InvalidGameState {
        /// The game.
        game_id: i64,
        /// The game's current status.
        status: GameStatus,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The change request is no longer pending.
    AlreadyFinalized {
        /// The change request.
        request_id: i64,
        /// The request's terminal status.
        status: RequestStatus,
    },
    /// The change request belongs to a different game.
    RequestGameMismatch {
        /// The change request.
        request_id: i64,
        /// The game the operation was scoped to.
        game_id: i64,
    },
    /// A status change is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Unknown game status string.
    InvalidGameStatus(String),
    /// Unknown request type string.
    InvalidRequestType(String),
    /// Unknown request status string.
    InvalidRequestStatus(String),
    /// Unknown schedule type string.
    InvalidScheduleType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGameNumber(msg) => write!(f, "Invalid game number: {msg}"),
            Self::InvalidTeams {
                home_team_id,
                away_team_id,
            } => {
                write!(
                    f,
                    "Invalid teams: home team {home_team_id} cannot play away team {away_team_id}"
                )
            }
            Self::InvalidLocation(msg) => write!(f, "Invalid location: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::InvalidScore {
                home_score,
                away_score,
            } => {
                write!(
                    f,
                    "Invalid score {home_score}-{away_score}: scores cannot be negative"
                )
            }
            Self::InvalidReason(msg) => write!(f, "Invalid reason: {msg}"),
            Self::InvalidRequester(msg) => write!(f, "Invalid requester: {msg}"),
            Self::NoChange { game_id } => {
                write!(
                    f,
                    "Requested schedule for game {game_id} is identical to the current schedule"
                )
            }
            Self::MissingRequestedSchedule { request_type } => {
                write!(f, "A {request_type} request requires a date, time and location")
            }
            Self::LocationChangeAltersDateTime { game_id } => {
                write!(
                    f,
                    "Location change for game {game_id} must keep the current date and time"
                )
            }
            Self::InvalidGameState {
                game_id,
                status,
                operation,
            } => {
                write!(f, "Cannot {operation}: game {game_id} is {status}")
            }
            Self::AlreadyFinalized { request_id, status } => {
                write!(
                    f,
                    "Change request {request_id} is already finalized with status {status}"
                )
            }
            Self::RequestGameMismatch {
                request_id,
                game_id,
            } => {
                write!(
                    f,
                    "Change request {request_id} does not belong to game {game_id}"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::InvalidGameStatus(s) => write!(f, "Invalid game status: {s}"),
            Self::InvalidRequestType(s) => write!(f, "Invalid request type: {s}"),
            Self::InvalidRequestStatus(s) => write!(f, "Invalid request status: {s}"),
            Self::InvalidScheduleType(s) => write!(f, "Invalid schedule type: {s}"),
        }
    }
}

impl std::error::Error for DomainError {}
