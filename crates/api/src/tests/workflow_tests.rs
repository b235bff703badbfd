// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use d8tl::ScheduleChangeNotification;
use d8tl_domain::{RequestStatus, RequestType};
use d8tl_persistence::Persistence;

use super::helpers::{
    cancel_request, create_game_request, create_test_admin, create_test_cause,
    create_test_coach, review_request, reschedule_to_wellwood, setup_with_game, submit_as_coach,
};
use crate::{
    ApiError, CreateGameResponse, GetGameScheduleResponse, PostponeGameRequest,
    RecordingNotificationSink, ReviewScheduleChangeRequest, ReviewScheduleChangeResponse,
    SubmitScheduleChangeRequest, SubmitScheduleChangeResponse, approve_schedule_change,
    create_game, deny_schedule_change, get_game_schedule, list_schedule_history, postpone_game,
    submit_schedule_change,
};

#[test]
fn test_create_game_returns_original_schedule() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let response: CreateGameResponse = create_game(
        &mut persistence,
        &create_game_request("U12-101"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.game.game_number, "U12-101");
    assert_eq!(response.game.status, "Active");
    assert_eq!(response.schedule.game_date, "2024-07-15");
    assert_eq!(response.schedule.game_time, "18:00");
    assert_eq!(response.schedule.location, "Eagle Hill MS");
    assert!(!response.schedule.is_cancelled);
}

#[test]
fn test_create_game_rejects_duplicate_number() {
    let (mut persistence, _) = setup_with_game();

    let result = create_game(
        &mut persistence,
        &create_game_request("U12-101"),
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_game_number"
    ));
}

#[test]
fn test_create_game_rejects_bad_date() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request = create_game_request("U12-101");
    request.game_date = String::from("2024-13-45");

    let result = create_game(
        &mut persistence,
        &request,
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "game_date"
    ));
}

#[test]
fn test_submit_records_actor_and_original_schedule() {
    let (mut persistence, game_id) = setup_with_game();

    let response: SubmitScheduleChangeResponse = submit_schedule_change(
        &mut persistence,
        &reschedule_to_wellwood(game_id),
        &create_test_coach(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.request.requested_by, "coach-456");
    assert_eq!(response.request.status, "Pending");
    assert_eq!(response.request.original.location, "Eagle Hill MS");
    assert_eq!(response.request.requested.location, "Wellwood MS");
    assert_eq!(response.request.requested.game_date, "2024-07-16");
}

#[test]
fn test_approve_applies_schedule_and_notifies() {
    let (mut persistence, game_id) = setup_with_game();
    let request_id: i64 = submit_as_coach(&mut persistence, &reschedule_to_wellwood(game_id));
    let sink: RecordingNotificationSink = RecordingNotificationSink::new();

    let response: ReviewScheduleChangeResponse = approve_schedule_change(
        &mut persistence,
        &sink,
        &ReviewScheduleChangeRequest {
            request_id,
            review_notes: Some(String::from("Wellwood confirmed")),
        },
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.request.status, "Approved");
    assert_eq!(response.request.reviewed_by.as_deref(), Some("admin-123"));
    assert_eq!(response.version_number, Some(2));
    assert_eq!(
        response.schedule.as_ref().map(|s| s.location.as_str()),
        Some("Wellwood MS")
    );

    let schedule: GetGameScheduleResponse = get_game_schedule(&mut persistence, game_id).unwrap();
    assert_eq!(schedule.schedule.location, "Wellwood MS");
    assert_eq!(schedule.schedule.game_date, "2024-07-16");
    assert_eq!(schedule.version_number, 2);
    assert_eq!(schedule.schedule_type, "Changed");

    assert_eq!(
        sink.notifications(),
        vec![ScheduleChangeNotification {
            game_id,
            request_id,
            request_type: RequestType::Reschedule,
            outcome: RequestStatus::Approved,
        }]
    );
}

#[test]
fn test_approved_cancel_marks_game_cancelled() {
    let (mut persistence, game_id) = setup_with_game();
    let request_id: i64 = submit_as_coach(&mut persistence, &cancel_request(game_id));
    let sink: RecordingNotificationSink = RecordingNotificationSink::new();

    let response: ReviewScheduleChangeResponse = approve_schedule_change(
        &mut persistence,
        &sink,
        &review_request(request_id),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.game.status, "Cancelled");
    let schedule = response.schedule.unwrap();
    assert!(schedule.is_cancelled);
    assert_eq!(schedule.location, "CANCELLED");
    assert_eq!(sink.notifications()[0].request_type, RequestType::Cancel);
}

#[test]
fn test_deny_leaves_schedule_and_notifies() {
    let (mut persistence, game_id) = setup_with_game();
    let request_id: i64 = submit_as_coach(&mut persistence, &reschedule_to_wellwood(game_id));
    let sink: RecordingNotificationSink = RecordingNotificationSink::new();

    let response: ReviewScheduleChangeResponse = deny_schedule_change(
        &mut persistence,
        &sink,
        &review_request(request_id),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.request.status, "Denied");
    assert_eq!(response.version_number, None);
    assert_eq!(response.schedule, None);
    assert_eq!(
        get_game_schedule(&mut persistence, game_id)
            .unwrap()
            .schedule
            .location,
        "Eagle Hill MS"
    );
    assert_eq!(sink.notifications()[0].outcome, RequestStatus::Denied);
}

#[test]
fn test_second_review_is_rejected_without_notification() {
    let (mut persistence, game_id) = setup_with_game();
    let request_id: i64 = submit_as_coach(&mut persistence, &reschedule_to_wellwood(game_id));
    let sink: RecordingNotificationSink = RecordingNotificationSink::new();

    approve_schedule_change(
        &mut persistence,
        &sink,
        &review_request(request_id),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let again = approve_schedule_change(
        &mut persistence,
        &sink,
        &review_request(request_id),
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        again,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "request_already_finalized"
    ));
    assert_eq!(sink.notifications().len(), 1);
    assert_eq!(
        list_schedule_history(&mut persistence, game_id)
            .unwrap()
            .entries
            .len(),
        2
    );
}

#[test]
fn test_submit_identical_schedule_is_rejected() {
    let (mut persistence, game_id) = setup_with_game();
    let request: SubmitScheduleChangeRequest = SubmitScheduleChangeRequest {
        game_id,
        request_type: String::from("Reschedule"),
        game_date: Some(String::from("2024-07-15")),
        game_time: Some(String::from("18:00")),
        location: Some(String::from("Eagle Hill MS")),
        reason: String::from("No reason"),
    };

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "schedule_must_change"
    ));
}

#[test]
fn test_submit_with_partial_schedule_is_invalid_input() {
    let (mut persistence, game_id) = setup_with_game();
    let mut request: SubmitScheduleChangeRequest = reschedule_to_wellwood(game_id);
    request.game_time = None;

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "game_time"
    ));
}

#[test]
fn test_submit_overlong_location_is_invalid_input() {
    let (mut persistence, game_id) = setup_with_game();
    let mut request: SubmitScheduleChangeRequest = reschedule_to_wellwood(game_id);
    request.location = Some("W".repeat(300));

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "location"
    ));
}

#[test]
fn test_submit_negative_year_is_invalid_input() {
    let (mut persistence, game_id) = setup_with_game();
    let mut request: SubmitScheduleChangeRequest = reschedule_to_wellwood(game_id);
    request.game_date = Some(String::from("-0001-07-15"));

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "game_date"
    ));
    assert!(get_game_schedule(&mut persistence, game_id).is_ok());
}

#[test]
fn test_submit_reschedule_without_schedule_is_invalid_input() {
    let (mut persistence, game_id) = setup_with_game();
    let mut request: SubmitScheduleChangeRequest = cancel_request(game_id);
    request.request_type = String::from("Reschedule");

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "requested"
    ));
}

#[test]
fn test_submit_unknown_request_type_is_invalid_input() {
    let (mut persistence, game_id) = setup_with_game();
    let mut request: SubmitScheduleChangeRequest = reschedule_to_wellwood(game_id);
    request.request_type = String::from("Swap");

    let result = submit_schedule_change(
        &mut persistence,
        &request,
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "request_type"
    ));
}

#[test]
fn test_submit_for_unknown_game_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = submit_schedule_change(
        &mut persistence,
        &reschedule_to_wellwood(99),
        &create_test_coach(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Game"
    ));
}

#[test]
fn test_review_unknown_request_is_not_found() {
    let (mut persistence, _) = setup_with_game();
    let sink: RecordingNotificationSink = RecordingNotificationSink::new();

    let result = deny_schedule_change(
        &mut persistence,
        &sink,
        &review_request(404),
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. })
            if resource_type == "Change request"
    ));
    assert!(sink.notifications().is_empty());
}

#[test]
fn test_postponed_game_returns_to_active_on_reschedule() {
    let (mut persistence, game_id) = setup_with_game();
    let postponed = postpone_game(
        &mut persistence,
        &PostponeGameRequest {
            game_id,
            reason: Some(String::from("Rain")),
        },
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(postponed.game.status, "Postponed");

    let request_id: i64 = submit_as_coach(&mut persistence, &reschedule_to_wellwood(game_id));
    let response: ReviewScheduleChangeResponse = approve_schedule_change(
        &mut persistence,
        &RecordingNotificationSink::new(),
        &review_request(request_id),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.game.status, "Active");
}
