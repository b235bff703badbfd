// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Two connections approving changes to the same game at the same time.

use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

use d8tl_domain::{HistoryEntry, RequestType, ScheduleSlot};
use time::macros::{date, time};

use super::{
    approve_command, create_test_actor, create_test_cause, create_test_setup, submit,
};
use crate::{CommandOutcome, Persistence, PersistenceError};

struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new(name: &str) -> Self {
        let path: PathBuf =
            std::env::temp_dir().join(format!("d8tl_{name}_{}.sqlite", std::process::id()));
        let database = Self { path };
        database.remove();
        database
    }

    fn remove(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.remove();
    }
}

#[test]
fn test_concurrent_approvals_serialize() {
    let database: TempDatabase = TempDatabase::new("concurrent_approvals");

    let mut first: Persistence = Persistence::new_with_file(&database.path).unwrap();
    let game_id: i64 = first
        .create_game(
            create_test_setup("U14-300"),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
        .game
        .game_id;

    let to_field_a: ScheduleSlot =
        ScheduleSlot::new(date!(2024 - 07 - 16), time!(18:00), "Field A").unwrap();
    let to_field_b: ScheduleSlot =
        ScheduleSlot::new(date!(2024 - 07 - 17), time!(18:00), "Field B").unwrap();
    let request_a: i64 = submit(&mut first, game_id, RequestType::Reschedule, Some(to_field_a));
    let request_b: i64 = submit(&mut first, game_id, RequestType::Reschedule, Some(to_field_b));

    let second: Persistence = Persistence::new_with_file(&database.path).unwrap();
    let barrier: Arc<Barrier> = Arc::new(Barrier::new(2));

    let handles: Vec<thread::JoinHandle<Result<CommandOutcome, PersistenceError>>> =
        [(first, request_a), (second, request_b)]
            .into_iter()
            .map(|(mut persistence, request_id)| {
                let barrier: Arc<Barrier> = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    persistence.execute(
                        game_id,
                        approve_command(request_id),
                        create_test_actor(),
                        create_test_cause(),
                    )
                })
            })
            .collect();

    let results: Vec<Result<CommandOutcome, PersistenceError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    let committed: usize = results.iter().filter(|r| r.is_ok()).count();
    assert!(committed >= 1, "at least one approval must commit: {results:?}");

    let mut reader: Persistence = Persistence::new_with_file(&database.path).unwrap();
    let versions: Vec<HistoryEntry> = reader.list_versions(game_id).unwrap();

    let numbers: Vec<u32> = versions.iter().map(|e| e.version_number).collect();
    let expected: Vec<u32> = (1..=u32::try_from(committed + 1).unwrap()).collect();
    assert_eq!(numbers, expected);
    assert_eq!(versions.iter().filter(|e| e.is_current).count(), 1);
    assert!(reader.get_game_schedule(game_id).is_ok());
    assert!(reader.check_consistency().unwrap().is_consistent());
}
