// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Games and their authoritative schedule record.

use crate::error::DomainError;
use crate::schedule::ScheduleSlot;
use crate::validation::{validate_game_number, validate_teams};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse-grained state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Scheduled and not yet played.
    Active,
    /// A final score has been recorded.
    Completed,
    /// Cancelled by an approved cancel request.
    Cancelled,
    /// Postponed by an admin pending a new date.
    Postponed,
}

impl GameStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Postponed => "Postponed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            "Postponed" => Ok(Self::Postponed),
            _ => Err(DomainError::InvalidGameStatus(s.to_string())),
        }
    }

    /// Returns true if new schedule change requests may be submitted.
    #[must_use]
    pub const fn accepts_change_requests(&self) -> bool {
        matches!(self, Self::Active | Self::Postponed)
    }

    /// Returns true if a score may be recorded.
    #[must_use]
    pub const fn accepts_scores(&self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Reopening a cancelled game is a legal transition here; whether it is
    /// actually performed is governed by [`crate::WorkflowPolicy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid: bool = match self {
            Self::Active => matches!(
                new_status,
                Self::Completed | Self::Cancelled | Self::Postponed
            ),
            Self::Completed | Self::Cancelled => matches!(new_status, Self::Active),
            Self::Postponed => matches!(new_status, Self::Active | Self::Cancelled),
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by game lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Internal identifier.
    pub game_id: i64,
    /// External-facing label, unique across the league.
    pub game_number: String,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: GameStatus,
}

/// Everything needed to create a game and its first schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub game_number: String,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    /// The original schedule; becomes history version 1.
    pub slot: ScheduleSlot,
}

impl GameSetup {
    /// Validates the setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the game number is blank or the teams are the same.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_game_number(&self.game_number)?;
        validate_teams(self.home_team_id, self.away_team_id)?;
        Ok(())
    }
}

/// The authoritative current date, time and location of a game.
///
/// Always equal to the history entry flagged current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub game_id: i64,
    pub slot: ScheduleSlot,
}
