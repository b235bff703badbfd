// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, Subcommand};
use d8tl_api::{
    ApiError, AuthenticatedActor, ClearScoreRequest, ConsistencyCheckResponse, CreateGameRequest,
    CreateGameResponse, GameStatusResponse, GetAuditLogResponse, GetGameScheduleResponse,
    ListChangeRequestsRequest, ListChangeRequestsResponse, ListGamesResponse,
    ListScheduleHistoryResponse, NotificationSink, PostponeGameRequest, RecordScoreRequest,
    ReviewScheduleChangeRequest, ReviewScheduleChangeResponse, Role, SubmitScheduleChangeRequest,
    SubmitScheduleChangeResponse, TracingNotificationSink, WithdrawScheduleChangeRequest,
    WithdrawScheduleChangeResponse, approve_schedule_change, authenticate_stub, check_consistency,
    clear_score, create_game, deny_schedule_change, get_game_audit_log, get_game_schedule,
    list_change_requests, list_games, list_schedule_history, postpone_game, record_score,
    submit_schedule_change, withdraw_schedule_change,
};
use d8tl_audit::Cause;
use d8tl_domain::WorkflowPolicy;
use d8tl_persistence::{ConsistencyReport, Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// D8TL Server - HTTP server for the District 8 Travel League schedule workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, global = true)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Return a cancelled game to active when a reschedule is approved
    #[arg(long, global = true)]
    reopen_on_reschedule: bool,

    #[command(subcommand)]
    command: Option<ServerCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum ServerCommand {
    /// Serve the HTTP API (default)
    Serve,
    /// Check every game's schedule ledger and exit non-zero on any violation
    CheckConsistency,
}

/// Application state shared across handlers.
///
/// The persistence layer holds a single connection, so access is serialized
/// behind an async mutex.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    /// Receives committed approve/deny outcomes.
    notifications: Arc<dyn NotificationSink>,
}

/// Identity and cause carried by every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorContext {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorContext {
    fn authenticate(&self) -> Result<AuthenticatedActor, HttpError> {
        let role: Role = Role::from_str(&self.actor_role).map_err(|_| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!(
                "Invalid role: '{}'. Must be 'admin' or 'coach'",
                self.actor_role
            ),
        })?;
        authenticate_stub(&self.actor_id, role).map_err(|e| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: e.to_string(),
        })
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// A write request body: the actor context plus the operation's fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AuthenticatedRequest<T> {
    #[serde(flatten)]
    context: ActorContext,
    #[serde(flatten)]
    request: T,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ScheduleInconsistent { game_id, .. } => {
                error!(game_id, error = %err, "Refusing to serve inconsistent schedule");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/games` endpoint.
async fn handle_create_game(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateGameRequest>>,
) -> Result<Json<CreateGameResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        game_number = %req.request.game_number,
        "Handling create_game request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateGameResponse =
        create_game(&mut persistence, &req.request, &actor, req.context.cause())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/games` endpoint.
async fn handle_list_games(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListGamesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_games(&mut persistence)?))
}

/// Handler for GET `/games/{game_id}/schedule` endpoint.
async fn handle_get_game_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GetGameScheduleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_game_schedule(&mut persistence, game_id)?))
}

/// Handler for GET `/games/{game_id}/history` endpoint.
async fn handle_list_schedule_history(
    AxumState(app_state): AxumState<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<ListScheduleHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_schedule_history(&mut persistence, game_id)?))
}

/// Handler for GET `/games/{game_id}/audit` endpoint.
async fn handle_get_game_audit_log(
    AxumState(app_state): AxumState<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GetAuditLogResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_game_audit_log(&mut persistence, game_id)?))
}

/// Handler for POST `/games/score` endpoint.
async fn handle_record_score(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<RecordScoreRequest>>,
) -> Result<Json<GameStatusResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        game_id = req.request.game_id,
        "Handling record_score request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GameStatusResponse =
        record_score(&mut persistence, &req.request, &actor, req.context.cause())?;
    Ok(Json(response))
}

/// Handler for POST `/games/clear_score` endpoint.
async fn handle_clear_score(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ClearScoreRequest>>,
) -> Result<Json<GameStatusResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        game_id = req.request.game_id,
        "Handling clear_score request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GameStatusResponse =
        clear_score(&mut persistence, &req.request, &actor, req.context.cause())?;
    Ok(Json(response))
}

/// Handler for POST `/games/postpone` endpoint.
async fn handle_postpone_game(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<PostponeGameRequest>>,
) -> Result<Json<GameStatusResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        game_id = req.request.game_id,
        "Handling postpone_game request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GameStatusResponse =
        postpone_game(&mut persistence, &req.request, &actor, req.context.cause())?;
    Ok(Json(response))
}

/// Handler for POST `/change_requests` endpoint.
async fn handle_submit_schedule_change(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<SubmitScheduleChangeRequest>>,
) -> Result<Json<SubmitScheduleChangeResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        game_id = req.request.game_id,
        request_type = %req.request.request_type,
        "Handling submit_schedule_change request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitScheduleChangeResponse =
        submit_schedule_change(&mut persistence, &req.request, &actor, req.context.cause())?;
    Ok(Json(response))
}

/// Handler for GET `/change_requests` endpoint.
///
/// Accepts optional `game_id` and `status` query parameters.
async fn handle_list_change_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListChangeRequestsRequest>,
) -> Result<Json<ListChangeRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_change_requests(&mut persistence, &query)?))
}

/// Handler for POST `/change_requests/approve` endpoint.
async fn handle_approve_schedule_change(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ReviewScheduleChangeRequest>>,
) -> Result<Json<ReviewScheduleChangeResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        request_id = req.request.request_id,
        "Handling approve_schedule_change request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewScheduleChangeResponse = approve_schedule_change(
        &mut persistence,
        app_state.notifications.as_ref(),
        &req.request,
        &actor,
        req.context.cause(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/change_requests/deny` endpoint.
async fn handle_deny_schedule_change(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ReviewScheduleChangeRequest>>,
) -> Result<Json<ReviewScheduleChangeResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        request_id = req.request.request_id,
        "Handling deny_schedule_change request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewScheduleChangeResponse = deny_schedule_change(
        &mut persistence,
        app_state.notifications.as_ref(),
        &req.request,
        &actor,
        req.context.cause(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/change_requests/withdraw` endpoint.
async fn handle_withdraw_schedule_change(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<WithdrawScheduleChangeRequest>>,
) -> Result<Json<WithdrawScheduleChangeResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        request_id = req.request.request_id,
        "Handling withdraw_schedule_change request"
    );
    let actor: AuthenticatedActor = req.context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: WithdrawScheduleChangeResponse =
        withdraw_schedule_change(&mut persistence, &req.request, &actor, req.context.cause())?;
    Ok(Json(response))
}

/// Handler for POST `/consistency` endpoint.
async fn handle_check_consistency(
    AxumState(app_state): AxumState<AppState>,
    Json(context): Json<ActorContext>,
) -> Result<Json<ConsistencyCheckResponse>, HttpError> {
    info!(actor_id = %context.actor_id, "Handling check_consistency request");
    let actor: AuthenticatedActor = context.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(check_consistency(&mut persistence, &actor)?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/games", post(handle_create_game))
        .route("/games", get(handle_list_games))
        .route("/games/score", post(handle_record_score))
        .route("/games/clear_score", post(handle_clear_score))
        .route("/games/postpone", post(handle_postpone_game))
        .route("/games/{game_id}/schedule", get(handle_get_game_schedule))
        .route("/games/{game_id}/history", get(handle_list_schedule_history))
        .route("/games/{game_id}/audit", get(handle_get_game_audit_log))
        .route("/change_requests", post(handle_submit_schedule_change))
        .route("/change_requests", get(handle_list_change_requests))
        .route(
            "/change_requests/approve",
            post(handle_approve_schedule_change),
        )
        .route("/change_requests/deny", post(handle_deny_schedule_change))
        .route(
            "/change_requests/withdraw",
            post(handle_withdraw_schedule_change),
        )
        .route("/consistency", post(handle_check_consistency))
        .with_state(app_state)
}

/// Opens the configured database and applies the workflow policy.
fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    let persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence.with_policy(WorkflowPolicy::new(args.reopen_on_reschedule)))
}

/// Runs the consistency job and reports every violation.
fn run_consistency_check(persistence: &mut Persistence) -> Result<ExitCode, PersistenceError> {
    let report: ConsistencyReport = persistence.check_consistency()?;
    for violation in &report.violations {
        warn!(%violation, "Schedule ledger violation");
    }
    if report.is_consistent() {
        info!(
            games_checked = report.games_checked,
            "Schedule ledger is consistent"
        );
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            games_checked = report.games_checked,
            violations = report.violations.len(),
            "Schedule ledger is inconsistent"
        );
        Ok(ExitCode::FAILURE)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing D8TL Server");

    let mut persistence: Persistence = open_persistence(&args)?;

    if args.command == Some(ServerCommand::CheckConsistency) {
        return Ok(run_consistency_check(&mut persistence)?);
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifications: Arc::new(TracingNotificationSink),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests;
