// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    GAME_ID, changed_entry, create_test_game, eagle_hill, original_entry, record, request,
    wellwood,
};
use crate::{
    ConsistencyViolation, GameStatus, HistoryEntry, RequestStatus, RequestType, ScheduleSlot,
    check_game_ledger,
};

#[test]
fn test_fresh_game_is_consistent() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&eagle_hill())),
        &[original_entry(&eagle_hill(), true)],
        &[],
    );
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_approved_reschedule_is_consistent() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[
            changed_entry(2, &wellwood(), 5, true),
            original_entry(&eagle_hill(), false),
        ],
        &[request(
            5,
            RequestType::Reschedule,
            &eagle_hill(),
            &wellwood(),
            RequestStatus::Approved,
        )],
    );
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_empty_history_reports_missing_original() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&eagle_hill())),
        &[],
        &[],
    );
    assert!(violations.contains(&ConsistencyViolation::MissingOriginal { game_id: GAME_ID }));
    assert!(violations.contains(&ConsistencyViolation::CurrentEntryCount {
        game_id: GAME_ID,
        found: 0,
    }));
}

#[test]
fn test_two_current_entries_reported() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[
            original_entry(&eagle_hill(), true),
            changed_entry(2, &wellwood(), 5, true),
        ],
        &[request(
            5,
            RequestType::Reschedule,
            &eagle_hill(),
            &wellwood(),
            RequestStatus::Approved,
        )],
    );
    assert_eq!(
        violations,
        vec![ConsistencyViolation::CurrentEntryCount {
            game_id: GAME_ID,
            found: 2,
        }]
    );
}

#[test]
fn test_version_gap_reported() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[
            original_entry(&eagle_hill(), false),
            changed_entry(3, &wellwood(), 5, true),
        ],
        &[request(
            5,
            RequestType::Reschedule,
            &eagle_hill(),
            &wellwood(),
            RequestStatus::Approved,
        )],
    );
    assert!(violations.contains(&ConsistencyViolation::VersionSequence {
        game_id: GAME_ID,
        expected: 2,
        found: 3,
    }));
}

#[test]
fn test_change_from_pending_request_reported() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[
            original_entry(&eagle_hill(), false),
            changed_entry(2, &wellwood(), 5, true),
        ],
        &[request(
            5,
            RequestType::Reschedule,
            &eagle_hill(),
            &wellwood(),
            RequestStatus::Pending,
        )],
    );
    assert!(violations.contains(&ConsistencyViolation::UnapprovedChange {
        game_id: GAME_ID,
        version_number: 2,
        request_id: 5,
    }));
}

#[test]
fn test_changed_entry_without_request_reported() {
    let mut orphan: HistoryEntry = changed_entry(2, &wellwood(), 5, true);
    orphan.change_request_id = None;

    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[original_entry(&eagle_hill(), false), orphan],
        &[],
    );
    assert!(violations.iter().any(|v| matches!(
        v,
        ConsistencyViolation::MalformedEntry {
            version_number: 2,
            ..
        }
    )));
}

#[test]
fn test_record_drift_reported() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&wellwood())),
        &[original_entry(&eagle_hill(), true)],
        &[],
    );
    assert_eq!(
        violations,
        vec![ConsistencyViolation::ScheduleRecordMismatch { game_id: GAME_ID }]
    );
}

#[test]
fn test_missing_record_reported() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Active),
        None,
        &[original_entry(&eagle_hill(), true)],
        &[],
    );
    assert_eq!(
        violations,
        vec![ConsistencyViolation::MissingScheduleRecord { game_id: GAME_ID }]
    );
}

#[test]
fn test_cancelled_status_requires_approved_cancel() {
    let violations = check_game_ledger(
        &create_test_game(GameStatus::Cancelled),
        Some(&record(&eagle_hill())),
        &[original_entry(&eagle_hill(), true)],
        &[],
    );
    assert_eq!(
        violations,
        vec![ConsistencyViolation::CancellationStatusMismatch {
            game_id: GAME_ID,
            status: GameStatus::Cancelled,
            current_is_cancellation: false,
        }]
    );
}

#[test]
fn test_approved_cancel_requires_cancelled_status() {
    let original: ScheduleSlot = eagle_hill();
    let cancelled: ScheduleSlot = ScheduleSlot::cancelled(original.date(), original.time());
    let history = [
        original_entry(&original, false),
        changed_entry(2, &cancelled, 5, true),
    ];
    let requests = [request(
        5,
        RequestType::Cancel,
        &original,
        &cancelled,
        RequestStatus::Approved,
    )];

    let consistent = check_game_ledger(
        &create_test_game(GameStatus::Cancelled),
        Some(&record(&cancelled)),
        &history,
        &requests,
    );
    assert!(consistent.is_empty(), "{consistent:?}");

    let drifted = check_game_ledger(
        &create_test_game(GameStatus::Active),
        Some(&record(&cancelled)),
        &history,
        &requests,
    );
    assert_eq!(
        drifted,
        vec![ConsistencyViolation::CancellationStatusMismatch {
            game_id: GAME_ID,
            status: GameStatus::Active,
            current_is_cancellation: true,
        }]
    );
}
