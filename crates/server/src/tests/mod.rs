// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use d8tl_api::RecordingNotificationSink;
use d8tl_domain::RequestStatus;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> (AppState, Arc<RecordingNotificationSink>) {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let sink: Arc<RecordingNotificationSink> = Arc::new(RecordingNotificationSink::new());
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifications: sink.clone(),
    };
    (app_state, sink)
}

fn context(actor_id: &str, role: &str) -> ActorContext {
    ActorContext {
        actor_id: actor_id.to_string(),
        actor_role: role.to_string(),
        cause_id: String::from("test-cause"),
        cause_description: String::from("Test request"),
    }
}

fn as_actor<T>(actor_id: &str, role: &str, request: T) -> AuthenticatedRequest<T> {
    AuthenticatedRequest {
        context: context(actor_id, role),
        request,
    }
}

fn create_game_request() -> CreateGameRequest {
    CreateGameRequest {
        game_number: String::from("U12-101"),
        season_id: 2024,
        division_id: 12,
        home_team_id: 1,
        away_team_id: 2,
        game_date: String::from("2024-07-15"),
        game_time: String::from("18:00"),
        location: String::from("Eagle Hill MS"),
    }
}

fn reschedule_request(game_id: i64) -> SubmitScheduleChangeRequest {
    SubmitScheduleChangeRequest {
        game_id,
        request_type: String::from("Reschedule"),
        game_date: Some(String::from("2024-07-16")),
        game_time: Some(String::from("18:00")),
        location: Some(String::from("Wellwood MS")),
        reason: String::from("Field unavailable"),
    }
}

async fn post_json<B: Serialize>(app: &Router, uri: &str, body: &B) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Creates the standard game as an admin and returns its id.
async fn create_game_as_admin(app: &Router) -> i64 {
    let response = post_json(
        app,
        "/games",
        &as_actor("admin1", "admin", create_game_request()),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    read_json::<CreateGameResponse>(response).await.game.game_id
}

/// Submits the standard reschedule as a coach and returns the request id.
async fn submit_as_coach(app: &Router, game_id: i64) -> i64 {
    let response = post_json(
        app,
        "/change_requests",
        &as_actor("coach1", "coach", reschedule_request(game_id)),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    read_json::<SubmitScheduleChangeResponse>(response)
        .await
        .request
        .request_id
}

#[tokio::test]
async fn test_create_game_as_admin_succeeds() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let game_id: i64 = create_game_as_admin(&app).await;

    let response = get(&app, &format!("/games/{game_id}/schedule")).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let schedule: GetGameScheduleResponse = read_json(response).await;
    assert_eq!(schedule.schedule.location, "Eagle Hill MS");
    assert_eq!(schedule.version_number, 1);
    assert_eq!(schedule.schedule_type, "Original");
}

#[tokio::test]
async fn test_create_game_as_coach_is_forbidden() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let response = post_json(
        &app,
        "/games",
        &as_actor("coach1", "coach", create_game_request()),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    let error_response: ErrorResponse = read_json(response).await;
    assert!(error_response.error);
    assert!(error_response.message.contains("Unauthorized"));

    let games: ListGamesResponse = read_json(get(&app, "/games").await).await;
    assert!(games.games.is_empty());
}

#[tokio::test]
async fn test_invalid_role_returns_bad_request() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let response = post_json(
        &app,
        "/games",
        &as_actor("user1", "umpire", create_game_request()),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_actor_is_unauthenticated() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let response = post_json(&app, "/games", &as_actor("", "admin", create_game_request())).await;

    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reschedule_approval_end_to_end() {
    let (app_state, sink) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;
    let request_id: i64 = submit_as_coach(&app, game_id).await;

    let response = post_json(
        &app,
        "/change_requests/approve",
        &as_actor(
            "admin1",
            "admin",
            ReviewScheduleChangeRequest {
                request_id,
                review_notes: None,
            },
        ),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let review: ReviewScheduleChangeResponse = read_json(response).await;
    assert_eq!(review.request.status, "Approved");
    assert_eq!(review.version_number, Some(2));

    let history: ListScheduleHistoryResponse =
        read_json(get(&app, &format!("/games/{game_id}/history")).await).await;
    assert_eq!(history.entries.len(), 2);
    assert_eq!(history.entries[1].change_request_id, Some(request_id));
    assert!(history.entries[1].is_current);

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].outcome, RequestStatus::Approved);
}

#[tokio::test]
async fn test_second_deny_is_unprocessable() {
    let (app_state, sink) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;
    let request_id: i64 = submit_as_coach(&app, game_id).await;
    let deny = as_actor(
        "admin1",
        "admin",
        ReviewScheduleChangeRequest {
            request_id,
            review_notes: Some(String::from("No fields open")),
        },
    );

    let first = post_json(&app, "/change_requests/deny", &deny).await;
    assert_eq!(first.status(), HttpStatusCode::OK);
    let second = post_json(&app, "/change_requests/deny", &deny).await;
    assert_eq!(second.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(sink.notifications().len(), 1);
    let schedule: GetGameScheduleResponse =
        read_json(get(&app, &format!("/games/{game_id}/schedule")).await).await;
    assert_eq!(schedule.schedule.location, "Eagle Hill MS");
}

#[tokio::test]
async fn test_list_change_requests_filters_by_status() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;
    submit_as_coach(&app, game_id).await;

    let pending: ListChangeRequestsResponse = read_json(
        get(
            &app,
            &format!("/change_requests?game_id={game_id}&status=Pending"),
        )
        .await,
    )
    .await;
    assert_eq!(pending.requests.len(), 1);

    let approved: ListChangeRequestsResponse =
        read_json(get(&app, "/change_requests?status=Approved").await).await;
    assert!(approved.requests.is_empty());
}

#[tokio::test]
async fn test_coach_withdraws_own_request() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;
    let request_id: i64 = submit_as_coach(&app, game_id).await;

    let response = post_json(
        &app,
        "/change_requests/withdraw",
        &as_actor("coach1", "coach", WithdrawScheduleChangeRequest { request_id }),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let withdrawn: WithdrawScheduleChangeResponse = read_json(response).await;
    assert_eq!(withdrawn.request.status, "Cancelled");
}

#[tokio::test]
async fn test_score_and_postpone_routes() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;

    let postponed = post_json(
        &app,
        "/games/postpone",
        &as_actor(
            "admin1",
            "admin",
            PostponeGameRequest {
                game_id,
                reason: Some(String::from("Rain")),
            },
        ),
    )
    .await;
    assert_eq!(postponed.status(), HttpStatusCode::OK);
    let postponed: GameStatusResponse = read_json(postponed).await;
    assert_eq!(postponed.game.status, "Postponed");

    let score = post_json(
        &app,
        "/games/score",
        &as_actor(
            "coach1",
            "coach",
            RecordScoreRequest {
                game_id,
                home_score: 4,
                away_score: 2,
            },
        ),
    )
    .await;
    assert_eq!(score.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_game_returns_not_found() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let response = get(&app, "/games/42/schedule").await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audit_log_route() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    let game_id: i64 = create_game_as_admin(&app).await;
    submit_as_coach(&app, game_id).await;

    let log: GetAuditLogResponse =
        read_json(get(&app, &format!("/games/{game_id}/audit")).await).await;

    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[0].action, "game_created");
    assert_eq!(log.events[0].actor_id, "admin1");
    assert_eq!(log.events[1].action, "schedule_change_submitted");
    assert_eq!(log.events[1].actor_id, "coach1");
}

#[tokio::test]
async fn test_consistency_route_requires_admin() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_game_as_admin(&app).await;

    let forbidden = post_json(&app, "/consistency", &context("coach1", "coach")).await;
    assert_eq!(forbidden.status(), HttpStatusCode::FORBIDDEN);

    let response = post_json(&app, "/consistency", &context("admin1", "admin")).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let report: ConsistencyCheckResponse = read_json(response).await;
    assert!(report.consistent);
    assert_eq!(report.games_checked, 1);
}

#[test]
fn test_consistency_check_exit_code_on_clean_store() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let code: ExitCode = run_consistency_check(&mut persistence).unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_args_parse_subcommand_and_policy() {
    let args: Args = Args::parse_from([
        "d8tl-server",
        "--reopen-on-reschedule",
        "check-consistency",
        "--database",
        "league.sqlite",
    ]);

    assert_eq!(args.command, Some(ServerCommand::CheckConsistency));
    assert!(args.reopen_on_reschedule);
    assert_eq!(args.database.as_deref(), Some("league.sqlite"));
    assert_eq!(args.port, 3000);
}
