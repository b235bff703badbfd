// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read paths that combine several tables.
//!
//! A schedule is only rendered when the record and the ledger agree. Any
//! disagreement is an error, never a best guess.

use d8tl_domain::{
    ChangeRequest, ConsistencyViolation, Game, HistoryEntry, ScheduleRecord, check_game_ledger,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::PersistenceError;
use crate::queries::RequestFilter;
use crate::store::ScheduleStore;

/// A game together with its verified effective schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSchedule {
    pub game: Game,
    pub record: ScheduleRecord,
    /// The ledger entry the record was verified against.
    pub current: HistoryEntry,
}

/// Result of a consistency pass over every game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub games_checked: usize,
    pub violations: Vec<ConsistencyViolation>,
}

impl ConsistencyReport {
    /// Returns true if no violation was found.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

fn require_game<C: ScheduleStore>(conn: &mut C, game_id: i64) -> Result<Game, PersistenceError> {
    conn.find_game(game_id)?
        .ok_or(PersistenceError::GameNotFound(game_id))
}

/// Loads a game and its schedule, verifying the record against the ledger.
///
/// # Errors
///
/// Returns `PersistenceError::GameNotFound` for an unknown game, a ledger
/// error if the game does not have exactly one current entry, and
/// `PersistenceError::ScheduleRecordMismatch` if the record is missing or
/// differs from the current entry.
pub fn get_game_schedule<C: ScheduleStore>(
    conn: &mut C,
    game_id: i64,
) -> Result<GameSchedule, PersistenceError> {
    let game: Game = require_game(conn, game_id)?;
    let current: HistoryEntry = conn.get_current(game_id)?;

    let Some(record) = conn.get_schedule_record(game_id)? else {
        error!(game_id, "Game has no schedule record");
        return Err(PersistenceError::ScheduleRecordMismatch { game_id });
    };
    if record.slot != current.slot {
        error!(
            game_id,
            record = %record.slot,
            current = %current.slot,
            version = current.version_number,
            "Schedule record differs from current history entry"
        );
        return Err(PersistenceError::ScheduleRecordMismatch { game_id });
    }

    Ok(GameSchedule {
        game,
        record,
        current,
    })
}

/// Lists a game's schedule history in ascending version order.
///
/// # Errors
///
/// Returns `PersistenceError::GameNotFound` for an unknown game.
pub fn list_game_versions<C: ScheduleStore>(
    conn: &mut C,
    game_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    require_game(conn, game_id)?;
    conn.list_versions(game_id)
}

/// Checks every stored invariant for every game.
///
/// # Errors
///
/// Returns an error only if the data cannot be read. Broken invariants are
/// reported in the returned `ConsistencyReport`.
pub fn check_consistency<C: ScheduleStore>(
    conn: &mut C,
) -> Result<ConsistencyReport, PersistenceError> {
    let games: Vec<Game> = conn.list_games()?;
    let mut report: ConsistencyReport = ConsistencyReport::default();

    for game in &games {
        let record: Option<ScheduleRecord> = conn.get_schedule_record(game.game_id)?;
        let history: Vec<HistoryEntry> = conn.list_versions(game.game_id)?;
        let requests: Vec<ChangeRequest> =
            conn.list_requests(RequestFilter::for_game(game.game_id))?;

        let violations: Vec<ConsistencyViolation> =
            check_game_ledger(game, record.as_ref(), &history, &requests);
        for violation in &violations {
            warn!(game_id = game.game_id, %violation, "Consistency violation");
        }
        report.violations.extend(violations);
        report.games_checked += 1;
    }

    info!(
        games_checked = report.games_checked,
        violations = report.violations.len(),
        "Consistency check complete"
    );
    Ok(report)
}
