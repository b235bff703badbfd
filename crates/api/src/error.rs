// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use d8tl::CoreError;
use d8tl_domain::DomainError;
use d8tl_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Stored schedule data breaks a ledger invariant and cannot be served.
    ScheduleInconsistent {
        /// The affected game.
        game_id: i64,
        /// A description of the broken invariant.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ScheduleInconsistent { game_id, message } => {
                write!(f, "Schedule for game {game_id} is inconsistent: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidGameNumber(_) => invalid_input("game_number", message),
        DomainError::InvalidTeams { .. } => invalid_input("away_team_id", message),
        DomainError::InvalidLocation(_) => invalid_input("location", message),
        DomainError::DateParseError { .. } => invalid_input("game_date", message),
        DomainError::TimeParseError { .. } => invalid_input("game_time", message),
        DomainError::InvalidScore { .. } => invalid_input("score", message),
        DomainError::InvalidReason(_) => invalid_input("reason", message),
        DomainError::InvalidRequester(_) => invalid_input("requested_by", message),
        DomainError::MissingRequestedSchedule { .. } => invalid_input("requested", message),
        DomainError::InvalidGameStatus(_) => invalid_input("status", message),
        DomainError::InvalidRequestType(_) => invalid_input("request_type", message),
        DomainError::InvalidRequestStatus(_) => invalid_input("status", message),
        DomainError::InvalidScheduleType(_) => invalid_input("schedule_type", message),
        DomainError::NoChange { .. } => rule_violation("schedule_must_change", message),
        DomainError::LocationChangeAltersDateTime { .. } => {
            rule_violation("location_change_keeps_date_time", message)
        }
        DomainError::InvalidGameState { .. } => rule_violation("game_state", message),
        DomainError::AlreadyFinalized { .. } => rule_violation("request_already_finalized", message),
        DomainError::RequestGameMismatch { .. } => rule_violation("request_belongs_to_game", message),
        DomainError::InvalidStatusTransition { .. } => {
            rule_violation("status_transition", message)
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RequestNotLoaded { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Rejected commands carry the core error that caused the rollback and are
/// translated through [`translate_core_error`].
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        PersistenceError::GameNotFound(game_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Game"),
            message: format!("Game {game_id} does not exist"),
        },
        PersistenceError::ChangeRequestNotFound(request_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Change request"),
            message: format!("Change request {request_id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DuplicateGameNumber(_) => {
            rule_violation("unique_game_number", err.to_string())
        }
        PersistenceError::DuplicateOriginal { .. } => {
            rule_violation("single_original_schedule", err.to_string())
        }
        PersistenceError::NoOriginalExists { game_id }
        | PersistenceError::NoCurrentEntry { game_id, .. }
        | PersistenceError::ScheduleRecordMismatch { game_id } => {
            ApiError::ScheduleInconsistent {
                game_id,
                message: err.to_string(),
            }
        }
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}
