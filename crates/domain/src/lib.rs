// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod change_request;
mod consistency;
mod error;
mod game;
mod history;
mod policy;
mod schedule;
mod validation;

#[cfg(test)]
mod tests;

pub use change_request::{ChangeRequest, RequestStatus, RequestType};
pub use consistency::{ConsistencyViolation, check_game_ledger};
pub use error::DomainError;
pub use game::{Game, GameSetup, GameStatus, ScheduleRecord};
pub use history::{HistoryEntry, ScheduleType};
pub use policy::WorkflowPolicy;
pub use schedule::{
    CANCELLED_LOCATION, MAX_LOCATION_LEN, ScheduleSlot, format_date, format_time, parse_date,
    parse_time,
};
pub use validation::{
    MAX_ACTOR_LEN, MAX_GAME_NUMBER_LEN, validate_change, validate_game_number, validate_reason,
    validate_requester, validate_score, validate_teams,
};
