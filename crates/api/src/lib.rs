// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the D8TL schedule workflow.
//!
//! This crate turns API requests into commands, enforces role-based
//! authorization, translates lower-layer errors into [`ApiError`] and hands
//! committed approve/deny outcomes to a [`NotificationSink`]. It is
//! transport-agnostic; the HTTP server wraps these handlers.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod notification;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_schedule_change, check_consistency, clear_score, create_game, deny_schedule_change,
    get_game_audit_log, get_game_schedule, list_change_requests, list_games,
    list_schedule_history, postpone_game, record_score, submit_schedule_change,
    withdraw_schedule_change,
};
pub use notification::{NotificationSink, RecordingNotificationSink, TracingNotificationSink};
pub use request_response::{
    AuditEventInfo, ChangeRequestInfo, ClearScoreRequest, ConsistencyCheckResponse,
    CreateGameRequest, CreateGameResponse, GameInfo, GameSnapshotInfo, GameStatusResponse, GetAuditLogResponse,
    GetGameScheduleResponse, HistoryEntryInfo, ListChangeRequestsRequest,
    ListChangeRequestsResponse, ListGamesResponse, ListScheduleHistoryResponse,
    PostponeGameRequest, RecordScoreRequest, ReviewScheduleChangeRequest,
    ReviewScheduleChangeResponse, ScheduleInfo, SubmitScheduleChangeRequest,
    SubmitScheduleChangeResponse, WithdrawScheduleChangeRequest, WithdrawScheduleChangeResponse,
};
