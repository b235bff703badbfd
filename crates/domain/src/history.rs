// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::ScheduleSlot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of schedule history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    /// Version 1, written once when the game is created.
    Original,
    /// Written by the approval of a change request.
    Changed,
}

impl ScheduleType {
    /// Returns the string representation of the schedule type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Changed => "Changed",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Original" => Ok(Self::Original),
            "Changed" => Ok(Self::Changed),
            _ => Err(DomainError::InvalidScheduleType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable version in a game's schedule history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub history_id: i64,
    pub game_id: i64,
    /// Starts at 1 and increases by exactly one per appended entry.
    pub version_number: u32,
    pub schedule_type: ScheduleType,
    pub slot: ScheduleSlot,
    /// Exactly one entry per game carries this flag.
    pub is_current: bool,
    /// The approved request that produced this entry. Always `None` for the
    /// original entry.
    pub change_request_id: Option<i64>,
    pub notes: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl HistoryEntry {
    /// Returns true if this is the version-1 original entry.
    #[must_use]
    pub fn is_original(&self) -> bool {
        self.schedule_type == ScheduleType::Original
    }
}
