// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization.
//!
//! Identity is supplied by the caller (the HTTP layer reads it from request
//! headers). Authorization is enforced here, before any command reaches the
//! state machine.

use std::str::FromStr;

use d8tl_audit::Actor;
use d8tl_domain::{ChangeRequest, MAX_ACTOR_LEN};

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// League administrators.
    ///
    /// Admins may perform:
    /// - game creation
    /// - approval and denial of schedule change requests
    /// - postponements and score corrections
    /// - any action a coach may perform
    Admin,
    /// Team coaches.
    ///
    /// Coaches may:
    /// - submit schedule change requests
    /// - withdraw requests they submitted
    /// - record final scores
    Coach,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Coach => "Coach",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "coach" => Ok(Self::Coach),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Coach => String::from("coach"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create games.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_create_game(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "create_game")
    }

    /// Checks if an actor is authorized to submit a schedule change request.
    ///
    /// Both roles may submit.
    ///
    /// # Errors
    ///
    /// This check currently always succeeds for an authenticated actor.
    pub const fn authorize_submit_request(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Coach => Ok(()),
        }
    }

    /// Checks if an actor is authorized to approve or deny change requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_review_request(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "review_schedule_change")
    }

    /// Checks if an actor may withdraw the given change request.
    ///
    /// Admins may withdraw any request. Coaches may withdraw only the
    /// requests they submitted.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `request` - The change request being withdrawn
    ///
    /// # Errors
    ///
    /// Returns an error if a coach tries to withdraw someone else's request.
    pub fn authorize_withdraw_request(
        actor: &AuthenticatedActor,
        request: &ChangeRequest,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coach if request.requested_by == actor.id => Ok(()),
            Role::Coach => Err(AuthError::Unauthorized {
                action: String::from("withdraw_schedule_change"),
                required_role: String::from("Admin or original requester"),
            }),
        }
    }

    /// Checks if an actor is authorized to record a final score.
    ///
    /// # Errors
    ///
    /// This check currently always succeeds for an authenticated actor.
    pub const fn authorize_record_score(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Coach => Ok(()),
        }
    }

    /// Checks if an actor is authorized to clear a recorded score.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_clear_score(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "clear_score")
    }

    /// Checks if an actor is authorized to postpone a game.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_postpone_game(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "postpone_game")
    }

    /// Checks if an actor is authorized to run the consistency check.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_check_consistency(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "check_consistency")
    }

    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coach => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Stub authentication.
///
/// Accepts any non-empty actor id of at most [`MAX_ACTOR_LEN`] characters.
/// The caller is trusted to have established the identity.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the actor id is empty or too long.
pub fn authenticate_stub(actor_id: &str, role: Role) -> Result<AuthenticatedActor, AuthError> {
    let actor_id: &str = actor_id.trim();
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    if actor_id.chars().count() > MAX_ACTOR_LEN {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("Actor ID cannot exceed {MAX_ACTOR_LEN} characters"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id.to_string(), role))
}
