// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use d8tl_domain::{RequestType, ScheduleSlot};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes to an existing game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Propose a change to the game's schedule.
    SubmitChangeRequest {
        /// Who is asking for the change.
        requested_by: String,
        /// The kind of change.
        request_type: RequestType,
        /// The proposed schedule. Ignored for cancellations, required
        /// otherwise.
        requested: Option<ScheduleSlot>,
        /// Why the change is needed.
        reason: String,
    },
    /// Approve a pending request and apply it to the schedule.
    ApproveChangeRequest {
        request_id: i64,
        reviewed_by: String,
        review_notes: Option<String>,
    },
    /// Deny a pending request. The schedule is untouched.
    DenyChangeRequest {
        request_id: i64,
        reviewed_by: String,
        review_notes: Option<String>,
    },
    /// Withdraw a pending request before review.
    WithdrawChangeRequest {
        request_id: i64,
        withdrawn_by: String,
    },
    /// Record a final score, completing the game.
    RecordScore { home_score: i32, away_score: i32 },
    /// Remove a recorded score, returning the game to active.
    ClearScore,
    /// Postpone the game until a new date is approved.
    PostponeGame { reason: Option<String> },
}

impl Command {
    /// Returns the change request this command targets, if any.
    #[must_use]
    pub const fn target_request_id(&self) -> Option<i64> {
        match self {
            Self::ApproveChangeRequest { request_id, .. }
            | Self::DenyChangeRequest { request_id, .. }
            | Self::WithdrawChangeRequest { request_id, .. } => Some(*request_id),
            Self::SubmitChangeRequest { .. }
            | Self::RecordScore { .. }
            | Self::ClearScore
            | Self::PostponeGame { .. } => None,
        }
    }
}
