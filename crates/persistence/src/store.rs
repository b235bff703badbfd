// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-generic access to the schedule tables.
//!
//! `backend_fn!` produces one monomorphic function per backend. This trait
//! gathers them behind one interface so the multi-step workflows in
//! `mutations::workflow` and `queries::views` are written once.

use d8tl::{ProposedChange, Review};
use d8tl_audit::AuditEvent;
use d8tl_domain::{ChangeRequest, Game, GameSetup, HistoryEntry, ScheduleRecord, ScheduleSlot};
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::error::PersistenceError;
use crate::queries::RequestFilter;
use crate::{mutations, queries};

/// Schedule operations available on every supported connection type.
pub trait ScheduleStore: PersistenceBackend {
    fn find_game(&mut self, game_id: i64) -> Result<Option<Game>, PersistenceError>;

    fn find_game_by_number(&mut self, game_number: &str)
    -> Result<Option<Game>, PersistenceError>;

    fn list_games(&mut self) -> Result<Vec<Game>, PersistenceError>;

    fn insert_game(&mut self, setup: &GameSetup, now: &str) -> Result<i64, PersistenceError>;

    fn update_game(&mut self, game: &Game, now: &str) -> Result<(), PersistenceError>;

    fn get_schedule_record(
        &mut self,
        game_id: i64,
    ) -> Result<Option<ScheduleRecord>, PersistenceError>;

    fn insert_schedule_record(
        &mut self,
        game_id: i64,
        slot: &ScheduleSlot,
        now: &str,
    ) -> Result<(), PersistenceError>;

    fn update_schedule_record(
        &mut self,
        game_id: i64,
        slot: &ScheduleSlot,
        now: &str,
    ) -> Result<(), PersistenceError>;

    /// See `mutations::ledger::append_original`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateOriginal` if version 1 exists.
    fn append_original(
        &mut self,
        game_id: i64,
        slot: &ScheduleSlot,
        now: &str,
    ) -> Result<HistoryEntry, PersistenceError>;

    /// See `mutations::ledger::append_change`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NoOriginalExists` if version 1 is missing.
    fn append_change(
        &mut self,
        game_id: i64,
        slot: &ScheduleSlot,
        change_request_id: i64,
        notes: Option<&str>,
        now: &str,
    ) -> Result<HistoryEntry, PersistenceError>;

    /// See `queries::ledger::get_current`.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one entry is current.
    fn get_current(&mut self, game_id: i64) -> Result<HistoryEntry, PersistenceError>;

    fn list_versions(&mut self, game_id: i64) -> Result<Vec<HistoryEntry>, PersistenceError>;

    fn insert_request(
        &mut self,
        change: &ProposedChange,
        now: &str,
    ) -> Result<i64, PersistenceError>;

    fn get_request(&mut self, request_id: i64) -> Result<ChangeRequest, PersistenceError>;

    fn finalize_request(&mut self, review: &Review, now: &str) -> Result<(), PersistenceError>;

    fn list_requests(
        &mut self,
        filter: RequestFilter,
    ) -> Result<Vec<ChangeRequest>, PersistenceError>;

    fn insert_audit_event(
        &mut self,
        event: &AuditEvent,
        now: &str,
    ) -> Result<i64, PersistenceError>;

    fn list_audit_events(&mut self, game_id: i64) -> Result<Vec<AuditEvent>, PersistenceError>;
}

/// Implements `ScheduleStore` for a connection type by forwarding to the
/// `backend_fn!` functions carrying the given suffix.
macro_rules! impl_schedule_store {
    ($conn:ty, $suffix:ident) => {
        pastey::paste! {
            impl ScheduleStore for $conn {
                fn find_game(&mut self, game_id: i64) -> Result<Option<Game>, PersistenceError> {
                    queries::games::[<find_game_ $suffix>](self, game_id)
                }

                fn find_game_by_number(
                    &mut self,
                    game_number: &str,
                ) -> Result<Option<Game>, PersistenceError> {
                    queries::games::[<find_game_by_number_ $suffix>](self, game_number)
                }

                fn list_games(&mut self) -> Result<Vec<Game>, PersistenceError> {
                    queries::games::[<list_games_ $suffix>](self)
                }

                fn insert_game(
                    &mut self,
                    setup: &GameSetup,
                    now: &str,
                ) -> Result<i64, PersistenceError> {
                    mutations::games::[<insert_game_ $suffix>](self, setup, now)
                }

                fn update_game(&mut self, game: &Game, now: &str) -> Result<(), PersistenceError> {
                    mutations::games::[<update_game_ $suffix>](self, game, now)
                }

                fn get_schedule_record(
                    &mut self,
                    game_id: i64,
                ) -> Result<Option<ScheduleRecord>, PersistenceError> {
                    queries::games::[<get_schedule_record_ $suffix>](self, game_id)
                }

                fn insert_schedule_record(
                    &mut self,
                    game_id: i64,
                    slot: &ScheduleSlot,
                    now: &str,
                ) -> Result<(), PersistenceError> {
                    mutations::games::[<insert_schedule_record_ $suffix>](self, game_id, slot, now)
                }

                fn update_schedule_record(
                    &mut self,
                    game_id: i64,
                    slot: &ScheduleSlot,
                    now: &str,
                ) -> Result<(), PersistenceError> {
                    mutations::games::[<update_schedule_record_ $suffix>](self, game_id, slot, now)
                }

                fn append_original(
                    &mut self,
                    game_id: i64,
                    slot: &ScheduleSlot,
                    now: &str,
                ) -> Result<HistoryEntry, PersistenceError> {
                    mutations::ledger::[<append_original_ $suffix>](self, game_id, slot, now)
                }

                fn append_change(
                    &mut self,
                    game_id: i64,
                    slot: &ScheduleSlot,
                    change_request_id: i64,
                    notes: Option<&str>,
                    now: &str,
                ) -> Result<HistoryEntry, PersistenceError> {
                    mutations::ledger::[<append_change_ $suffix>](
                        self,
                        game_id,
                        slot,
                        change_request_id,
                        notes,
                        now,
                    )
                }

                fn get_current(&mut self, game_id: i64) -> Result<HistoryEntry, PersistenceError> {
                    queries::ledger::[<get_current_ $suffix>](self, game_id)
                }

                fn list_versions(
                    &mut self,
                    game_id: i64,
                ) -> Result<Vec<HistoryEntry>, PersistenceError> {
                    queries::ledger::[<list_versions_ $suffix>](self, game_id)
                }

                fn insert_request(
                    &mut self,
                    change: &ProposedChange,
                    now: &str,
                ) -> Result<i64, PersistenceError> {
                    mutations::requests::[<insert_request_ $suffix>](self, change, now)
                }

                fn get_request(&mut self, request_id: i64) -> Result<ChangeRequest, PersistenceError> {
                    queries::requests::[<get_request_ $suffix>](self, request_id)
                }

                fn finalize_request(
                    &mut self,
                    review: &Review,
                    now: &str,
                ) -> Result<(), PersistenceError> {
                    mutations::requests::[<finalize_request_ $suffix>](self, review, now)
                }

                fn list_requests(
                    &mut self,
                    filter: RequestFilter,
                ) -> Result<Vec<ChangeRequest>, PersistenceError> {
                    queries::requests::[<list_requests_ $suffix>](self, filter)
                }

                fn insert_audit_event(
                    &mut self,
                    event: &AuditEvent,
                    now: &str,
                ) -> Result<i64, PersistenceError> {
                    mutations::audit::[<insert_audit_event_ $suffix>](self, event, now)
                }

                fn list_audit_events(
                    &mut self,
                    game_id: i64,
                ) -> Result<Vec<AuditEvent>, PersistenceError> {
                    queries::audit::[<list_audit_events_ $suffix>](self, game_id)
                }
            }
        }
    };
}

impl_schedule_store!(SqliteConnection, sqlite);
impl_schedule_store!(MysqlConnection, mysql);
