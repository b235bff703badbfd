// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.

use d8tl_audit::{Action, Actor, AuditEvent, Cause, GameSnapshot, StateSnapshot};
use d8tl_domain::{
    ChangeRequest, DomainError, Game, GameStatus, HistoryEntry, ScheduleRecord, ScheduleSlot,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
///
/// `game` is `None` for the state before a game was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub game: Option<GameSnapshotData>,
}

/// Serializable representation of a `GameSnapshot`.
///
/// The schedule uses the same strings as the schedule tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshotData {
    pub game_number: String,
    pub status: String,
    pub game_date: String,
    pub game_time: String,
    pub location: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            game: snapshot.game().map(|game| GameSnapshotData {
                game_number: game.game_number.clone(),
                status: game.status.as_str().to_string(),
                game_date: game.slot.date_string(),
                game_time: game.slot.time_string(),
                location: game.slot.location().to_string(),
                home_score: game.home_score,
                away_score: game.away_score,
            }),
        }
    }
}

impl StateSnapshotData {
    /// Rebuilds the typed snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if the stored status
    /// or schedule is not valid.
    pub fn into_snapshot(self) -> Result<StateSnapshot, PersistenceError> {
        let Some(game) = self.game else {
            return Ok(StateSnapshot::NoGame);
        };
        let status: GameStatus = game.status.parse().map_err(|e| reconstruction(&e))?;
        let slot: ScheduleSlot = stored_slot(&game.game_date, &game.game_time, &game.location)?;
        Ok(StateSnapshot::Game(GameSnapshot {
            game_number: game.game_number,
            status,
            slot,
            home_score: game.home_score,
            away_score: game.away_score,
        }))
    }
}

fn reconstruction(err: &DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

fn stored_slot(date: &str, time: &str, location: &str) -> Result<ScheduleSlot, PersistenceError> {
    ScheduleSlot::from_stored(date, time, location).map_err(|e| reconstruction(&e))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::games)]
pub struct GameRow {
    pub game_id: i64,
    pub game_number: String,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub game_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl GameRow {
    /// Converts the row into a domain game.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is unknown.
    pub fn into_game(self) -> Result<Game, PersistenceError> {
        Ok(Game {
            game_id: self.game_id,
            game_number: self.game_number,
            season_id: self.season_id,
            division_id: self.division_id,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            home_score: self.home_score,
            away_score: self.away_score,
            status: self.game_status.parse().map_err(|e| reconstruction(&e))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::schedules)]
pub struct ScheduleRow {
    pub schedule_id: i64,
    pub game_id: i64,
    pub game_date: String,
    pub game_time: String,
    pub location: String,
    pub updated_at: String,
}

impl ScheduleRow {
    /// Converts the row into the game's schedule record.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date or time is malformed.
    pub fn into_record(self) -> Result<ScheduleRecord, PersistenceError> {
        Ok(ScheduleRecord {
            game_id: self.game_id,
            slot: stored_slot(&self.game_date, &self.game_time, &self.location)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::schedule_history)]
pub struct HistoryRow {
    pub history_id: i64,
    pub game_id: i64,
    pub version_number: i32,
    pub schedule_type: String,
    pub game_date: String,
    pub game_time: String,
    pub location: String,
    pub is_current: i32,
    pub change_request_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl HistoryRow {
    /// Converts the row into a history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the row holds an invalid version, type or slot.
    pub fn into_entry(self) -> Result<HistoryEntry, PersistenceError> {
        let version_number: u32 = self.version_number.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "history {} has invalid version number {}",
                self.history_id, self.version_number
            ))
        })?;

        Ok(HistoryEntry {
            history_id: self.history_id,
            game_id: self.game_id,
            version_number,
            schedule_type: self.schedule_type.parse().map_err(|e| reconstruction(&e))?,
            slot: stored_slot(&self.game_date, &self.game_time, &self.location)?,
            is_current: self.is_current != 0,
            change_request_id: self.change_request_id,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::schedule_change_requests)]
pub struct ChangeRequestRow {
    pub request_id: i64,
    pub game_id: i64,
    pub requested_by: String,
    pub request_type: String,
    pub original_date: String,
    pub original_time: String,
    pub original_location: String,
    pub requested_date: String,
    pub requested_time: String,
    pub requested_location: String,
    pub reason: String,
    pub request_status: String,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    pub created_date: String,
    pub reviewed_at: Option<String>,
}

impl ChangeRequestRow {
    /// Converts the row into a change request.
    ///
    /// # Errors
    ///
    /// Returns an error if the row holds an unknown type or status, or a
    /// malformed slot.
    pub fn into_request(self) -> Result<ChangeRequest, PersistenceError> {
        Ok(ChangeRequest {
            request_id: Some(self.request_id),
            game_id: self.game_id,
            requested_by: self.requested_by,
            request_type: self.request_type.parse().map_err(|e| reconstruction(&e))?,
            original: stored_slot(
                &self.original_date,
                &self.original_time,
                &self.original_location,
            )?,
            requested: stored_slot(
                &self.requested_date,
                &self.requested_time,
                &self.requested_location,
            )?,
            reason: self.reason,
            status: self.request_status.parse().map_err(|e| reconstruction(&e))?,
            reviewed_by: self.reviewed_by,
            review_notes: self.review_notes,
            created_at: self.created_date,
            reviewed_at: self.reviewed_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub game_id: i64,
    pub actor_id: String,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl AuditEventRow {
    /// Deserializes the stored audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if any JSON column cannot be deserialized.
    pub fn into_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok(AuditEvent::new(
            self.game_id,
            Actor::new(actor.id, actor.actor_type),
            Cause::new(cause.id, cause.description),
            Action::new(action.name, action.details),
            before.into_snapshot()?,
            after.into_snapshot()?,
        )
        .with_id(self.event_id))
    }
}
