// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use d8tl::CoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested game does not exist.
    GameNotFound(i64),
    /// The requested change request does not exist.
    ChangeRequestNotFound(i64),
    /// Another game already uses this game number.
    DuplicateGameNumber(String),
    /// The game already has a version-1 history entry.
    DuplicateOriginal { game_id: i64 },
    /// The game has no version-1 history entry yet.
    NoOriginalExists { game_id: i64 },
    /// The game has history but not exactly one current entry.
    NoCurrentEntry { game_id: i64, found: usize },
    /// The schedule record disagrees with the current history entry.
    ScheduleRecordMismatch { game_id: i64 },
    /// The command was rejected by the state transition rules.
    Rejected(CoreError),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Stored data is invalid: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::GameNotFound(id) => write!(f, "Game not found: {id}"),
            Self::ChangeRequestNotFound(id) => write!(f, "Change request not found: {id}"),
            Self::DuplicateGameNumber(number) => {
                write!(f, "Game number '{number}' is already in use")
            }
            Self::DuplicateOriginal { game_id } => {
                write!(f, "Game {game_id} already has an original schedule")
            }
            Self::NoOriginalExists { game_id } => {
                write!(f, "Game {game_id} has no original schedule")
            }
            Self::NoCurrentEntry { game_id, found } => {
                write!(
                    f,
                    "Game {game_id} has {found} current schedule entries; expected exactly one"
                )
            }
            Self::ScheduleRecordMismatch { game_id } => {
                write!(
                    f,
                    "Schedule record for game {game_id} does not match its schedule history"
                )
            }
            Self::Rejected(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}
