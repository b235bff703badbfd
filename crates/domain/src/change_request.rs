// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule change requests and their approval lifecycle.
//!
//! A request starts `Pending` and moves exactly once to a terminal
//! status. Only an approval has side effects on the game.

use crate::error::DomainError;
use crate::schedule::ScheduleSlot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a change request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Move the game to a new date, time and/or location.
    Reschedule,
    /// Move the game to a new location at the same date and time.
    #[serde(rename = "Location Change")]
    LocationChange,
    /// Cancel the game.
    Cancel,
}

impl RequestType {
    /// Returns the string representation of the request type.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reschedule => "Reschedule",
            Self::LocationChange => "Location Change",
            Self::Cancel => "Cancel",
        }
    }

    /// Returns true for cancellations.
    #[must_use]
    pub const fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reschedule" => Ok(Self::Reschedule),
            "Location Change" => Ok(Self::LocationChange),
            "Cancel" => Ok(Self::Cancel),
            _ => Err(DomainError::InvalidRequestType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
    /// Withdrawn before review.
    Cancelled,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }
        if new_status == Self::Pending {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "request is already pending".to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Denied" => Ok(Self::Denied),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed modification to a game's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// `None` until persisted.
    pub request_id: Option<i64>,
    pub game_id: i64,
    pub requested_by: String,
    pub request_type: RequestType,
    /// The schedule that was current when the request was submitted.
    pub original: ScheduleSlot,
    pub requested: ScheduleSlot,
    pub reason: String,
    pub status: RequestStatus,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    /// RFC 3339 submission timestamp.
    pub created_at: String,
    pub reviewed_at: Option<String>,
}

impl ChangeRequest {
    /// Returns true while the request awaits review.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
