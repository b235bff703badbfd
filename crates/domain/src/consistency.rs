// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consistency rules across a game's record, history and requests.
//!
//! The write path enforces these rules. This module re-checks them over
//! stored data so drift is reported instead of silently repaired.

use crate::change_request::{ChangeRequest, RequestStatus, RequestType};
use crate::game::{Game, GameStatus, ScheduleRecord};
use crate::history::{HistoryEntry, ScheduleType};
use serde::Serialize;

/// A single broken invariant found in stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyViolation {
    /// The game has no history at all, or no version-1 original entry.
    MissingOriginal { game_id: i64 },
    /// An entry's type, version number and request link disagree.
    MalformedEntry {
        game_id: i64,
        version_number: u32,
        reason: String,
    },
    /// Version numbers are not exactly `1..N`.
    VersionSequence {
        game_id: i64,
        expected: u32,
        found: u32,
    },
    /// Not exactly one entry is flagged current.
    CurrentEntryCount { game_id: i64, found: usize },
    /// A changed entry links to a request that is missing or not approved.
    UnapprovedChange {
        game_id: i64,
        version_number: u32,
        request_id: i64,
    },
    /// The game has no schedule record.
    MissingScheduleRecord { game_id: i64 },
    /// The schedule record differs from the current history entry.
    ScheduleRecordMismatch { game_id: i64 },
    /// The game's status disagrees with whether the current entry came from
    /// an approved cancellation.
    CancellationStatusMismatch {
        game_id: i64,
        status: GameStatus,
        current_is_cancellation: bool,
    },
}

impl std::fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOriginal { game_id } => {
                write!(f, "game {game_id}: no original history entry")
            }
            Self::MalformedEntry {
                game_id,
                version_number,
                reason,
            } => write!(f, "game {game_id} version {version_number}: {reason}"),
            Self::VersionSequence {
                game_id,
                expected,
                found,
            } => write!(
                f,
                "game {game_id}: expected version {expected}, found {found}"
            ),
            Self::CurrentEntryCount { game_id, found } => {
                write!(f, "game {game_id}: {found} entries flagged current")
            }
            Self::UnapprovedChange {
                game_id,
                version_number,
                request_id,
            } => write!(
                f,
                "game {game_id} version {version_number}: request {request_id} is not an approved request for this game"
            ),
            Self::MissingScheduleRecord { game_id } => {
                write!(f, "game {game_id}: no schedule record")
            }
            Self::ScheduleRecordMismatch { game_id } => {
                write!(
                    f,
                    "game {game_id}: schedule record differs from current history entry"
                )
            }
            Self::CancellationStatusMismatch {
                game_id,
                status,
                current_is_cancellation,
            } => {
                if *current_is_cancellation {
                    write!(
                        f,
                        "game {game_id}: current entry is an approved cancellation but status is {status}"
                    )
                } else {
                    write!(
                        f,
                        "game {game_id}: status is {status} but current entry is not an approved cancellation"
                    )
                }
            }
        }
    }
}

/// Checks every stored invariant for one game.
///
/// # Arguments
///
/// * `game` - The game
/// * `record` - The game's schedule record, if any
/// * `history` - All history entries for the game, in any order
/// * `requests` - All change requests for the game
///
/// # Returns
///
/// Every violation found. An empty vector means the game is consistent.
#[must_use]
pub fn check_game_ledger(
    game: &Game,
    record: Option<&ScheduleRecord>,
    history: &[HistoryEntry],
    requests: &[ChangeRequest],
) -> Vec<ConsistencyViolation> {
    let game_id: i64 = game.game_id;
    let mut violations: Vec<ConsistencyViolation> = Vec::new();

    let mut entries: Vec<&HistoryEntry> = history.iter().collect();
    entries.sort_by_key(|e| e.version_number);

    if !entries
        .first()
        .is_some_and(|e| e.version_number == 1 && e.is_original())
    {
        violations.push(ConsistencyViolation::MissingOriginal { game_id });
    }

    for (expected, entry) in (1_u32..).zip(entries.iter()) {
        if entry.version_number != expected {
            violations.push(ConsistencyViolation::VersionSequence {
                game_id,
                expected,
                found: entry.version_number,
            });
            break;
        }
    }

    for entry in &entries {
        check_entry_shape(game_id, entry, requests, &mut violations);
    }

    let current: Vec<&&HistoryEntry> = entries.iter().filter(|e| e.is_current).collect();
    if current.len() != 1 {
        violations.push(ConsistencyViolation::CurrentEntryCount {
            game_id,
            found: current.len(),
        });
    }

    match record {
        None => violations.push(ConsistencyViolation::MissingScheduleRecord { game_id }),
        Some(record) => {
            if let [current] = current.as_slice()
                && record.slot != current.slot
            {
                violations.push(ConsistencyViolation::ScheduleRecordMismatch { game_id });
            }
        }
    }

    if let [current] = current.as_slice() {
        let current_is_cancellation: bool = current
            .change_request_id
            .and_then(|id| find_request(requests, id))
            .is_some_and(|r| {
                r.request_type == RequestType::Cancel && r.status == RequestStatus::Approved
            });
        let is_cancelled: bool = game.status == GameStatus::Cancelled;
        if current_is_cancellation != is_cancelled {
            violations.push(ConsistencyViolation::CancellationStatusMismatch {
                game_id,
                status: game.status,
                current_is_cancellation,
            });
        }
    }

    violations
}

fn check_entry_shape(
    game_id: i64,
    entry: &HistoryEntry,
    requests: &[ChangeRequest],
    violations: &mut Vec<ConsistencyViolation>,
) {
    let version_number: u32 = entry.version_number;
    let malformed = |reason: &str| ConsistencyViolation::MalformedEntry {
        game_id,
        version_number,
        reason: reason.to_string(),
    };

    match (entry.schedule_type, version_number, entry.change_request_id) {
        (ScheduleType::Original, 1, None) => {}
        (ScheduleType::Original, 1, Some(_)) => {
            violations.push(malformed("original entry references a change request"));
        }
        (ScheduleType::Original, _, _) => {
            violations.push(malformed("original entry is not version 1"));
        }
        (ScheduleType::Changed, 1, _) => {
            violations.push(malformed("version 1 is not an original entry"));
        }
        (ScheduleType::Changed, _, None) => {
            violations.push(malformed("changed entry has no change request"));
        }
        (ScheduleType::Changed, _, Some(request_id)) => {
            let approved: bool = find_request(requests, request_id)
                .is_some_and(|r| r.game_id == game_id && r.status == RequestStatus::Approved);
            if !approved {
                violations.push(ConsistencyViolation::UnapprovedChange {
                    game_id,
                    version_number,
                    request_id,
                });
            }
        }
    }
}

fn find_request(requests: &[ChangeRequest], request_id: i64) -> Option<&ChangeRequest> {
    requests.iter().find(|r| r.request_id == Some(request_id))
}
