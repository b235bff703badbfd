// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::change_request::RequestType;
use crate::error::DomainError;
use crate::schedule::ScheduleSlot;

/// Longest accepted game number, matching the `VARCHAR(64)` column.
pub const MAX_GAME_NUMBER_LEN: usize = 64;

/// Longest accepted actor id, matching the `VARCHAR(255)` columns.
pub const MAX_ACTOR_LEN: usize = 255;

/// Validates a game number.
///
/// # Errors
///
/// Returns an error if the game number is blank or longer than
/// [`MAX_GAME_NUMBER_LEN`] characters once trimmed.
pub fn validate_game_number(game_number: &str) -> Result<(), DomainError> {
    let game_number: &str = game_number.trim();
    if game_number.is_empty() {
        return Err(DomainError::InvalidGameNumber(String::from(
            "Game number cannot be empty",
        )));
    }
    if game_number.chars().count() > MAX_GAME_NUMBER_LEN {
        return Err(DomainError::InvalidGameNumber(format!(
            "Game number cannot exceed {MAX_GAME_NUMBER_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates that a game is played between two different teams.
///
/// # Errors
///
/// Returns `DomainError::InvalidTeams` if both ids are equal.
pub const fn validate_teams(home_team_id: i64, away_team_id: i64) -> Result<(), DomainError> {
    if home_team_id == away_team_id {
        return Err(DomainError::InvalidTeams {
            home_team_id,
            away_team_id,
        });
    }
    Ok(())
}

/// Validates a final score.
///
/// # Errors
///
/// Returns `DomainError::InvalidScore` if either score is negative.
pub const fn validate_score(home_score: i32, away_score: i32) -> Result<(), DomainError> {
    if home_score < 0 || away_score < 0 {
        return Err(DomainError::InvalidScore {
            home_score,
            away_score,
        });
    }
    Ok(())
}

/// Validates the reason given for a change request.
///
/// # Errors
///
/// Returns an error if the reason is blank.
pub fn validate_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::InvalidReason(String::from(
            "A reason is required for schedule change requests",
        )));
    }
    Ok(())
}

/// Validates the identity recorded as a request's submitter.
///
/// # Errors
///
/// Returns an error if the requester is blank or longer than
/// [`MAX_ACTOR_LEN`] characters once trimmed.
pub fn validate_requester(requested_by: &str) -> Result<(), DomainError> {
    let requested_by: &str = requested_by.trim();
    if requested_by.is_empty() {
        return Err(DomainError::InvalidRequester(String::from(
            "Requester cannot be empty",
        )));
    }
    if requested_by.chars().count() > MAX_ACTOR_LEN {
        return Err(DomainError::InvalidRequester(format!(
            "Requester cannot exceed {MAX_ACTOR_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a requested schedule against the current one.
///
/// # Arguments
///
/// * `game_id` - The game the request targets
/// * `request_type` - The kind of change
/// * `original` - The schedule current at submission time
/// * `requested` - The proposed schedule
///
/// # Errors
///
/// Returns `DomainError::NoChange` if the requested slot equals the original,
/// `DomainError::LocationChangeAltersDateTime` if a location change moves
/// the date or time, and `DomainError::InvalidLocation` if a non-cancel
/// request targets the cancellation marker.
pub fn validate_change(
    game_id: i64,
    request_type: RequestType,
    original: &ScheduleSlot,
    requested: &ScheduleSlot,
) -> Result<(), DomainError> {
    if requested == original {
        return Err(DomainError::NoChange { game_id });
    }
    match request_type {
        RequestType::Cancel => {
            if !requested.is_cancellation() {
                return Err(DomainError::InvalidLocation(String::from(
                    "A cancel request must target the cancellation marker",
                )));
            }
        }
        RequestType::Reschedule | RequestType::LocationChange => {
            if requested.is_cancellation() {
                return Err(DomainError::InvalidLocation(String::from(
                    "Use a cancel request to cancel a game",
                )));
            }
            if request_type == RequestType::LocationChange
                && requested.moves_date_or_time(original)
            {
                return Err(DomainError::LocationChangeAltersDateTime { game_id });
            }
        }
    }
    Ok(())
}
