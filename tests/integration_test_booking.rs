mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{Canned, TestApp};
use ride_booking_backend::domain::services::normalize::ALLOWED_DURATIONS;
use serde_json::{json, Value};

fn airport_submission() -> Value {
    json!({
        "date": "2025-06-01",
        "time": "14:30",
        "tripType": "airport",
        "attendee": { "name": "Jane Doe", "email": "jane@example.com", "phone": "5551234567" },
        "tripDetails": {
            "pickupLocation": "DFW Terminal D",
            "dropoffLocation": "The Adolphus, Dallas",
            "estimatedDistance": 21.4,
            "estimatedPrice": 85.6,
            "passengers": 2,
            "flightNumber": "AA2410"
        }
    })
}

fn looks_like_reference(value: &str) -> bool {
    value.len() == 11
        && value.starts_with("GR-")
        && value[3..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

#[tokio::test]
async fn test_airport_booking_end_to_end() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/api/booking", &airport_submission().to_string()).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Booking confirmed successfully");
    assert_eq!(body["booking"]["uid"], "bk_9001");
    assert_eq!(body["booking"]["id"], 9001);
    let reference = body["booking"]["reference"].as_str().unwrap();
    assert!(looks_like_reference(reference), "bad reference {}", reference);

    assert!(app.scheduling.slot_calls.lock().unwrap().is_empty());
    let sent = app.scheduling.last_created();
    assert_eq!(sent.start, "2025-06-01T19:30:00Z");
    assert_eq!(sent.attendee.phone_number.as_deref(), Some("+15551234567"));
    assert_eq!(sent.attendee.time_zone, "America/Chicago");
    assert!(ALLOWED_DURATIONS.contains(&sent.length_in_minutes));
    assert_eq!(sent.event_type_slug.as_deref(), Some("airport-transfer"));
    assert_eq!(sent.username.as_deref(), Some("goldridr"));
    assert_eq!(sent.metadata["bookingReference"], reference);
    assert_eq!(sent.booking_fields_responses.booking_reference, reference);
    assert_eq!(sent.booking_fields_responses.estimated_total, "$85.60");
    assert_eq!(sent.booking_fields_responses.flight_number, "AA2410");
    assert!(sent.metadata.values().all(|v| v.chars().count() <= 500));
}

#[tokio::test]
async fn test_invalid_submission_makes_no_outbound_call() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/booking", &json!({ "time": "10:00", "attendee": { "name": "Jo", "email": "nope" } }).to_string())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    let details: Vec<&str> = body["details"].as_array().unwrap().iter().filter_map(Value::as_str).collect();
    assert_eq!(details, vec!["attendee.email: Invalid email address", "date: Date is required"]);
    assert_eq!(app.scheduling.outbound_calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_failure() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/api/booking", "{\"date\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(app.scheduling.outbound_calls(), 0);
}

#[tokio::test]
async fn test_unknown_trip_type_is_rejected() {
    let app = TestApp::new();
    let mut submission = airport_submission();
    submission["tripType"] = json!("helicopter");

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(app.scheduling.outbound_calls(), 0);
}

#[tokio::test]
async fn test_explicit_event_type_books_open_slot() {
    let app = TestApp::new();
    *app.scheduling.slots.lock().unwrap() = Canned::Ok(vec![
        "2025-06-01T14:00:00.000-05:00".into(),
        "2025-06-01T14:30:00.000-05:00".into(),
    ]);
    let mut submission = airport_submission();
    submission["eventTypeId"] = json!(4242);

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let calls = app.scheduling.slot_calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![(4242, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())]
    );
    assert_eq!(app.scheduling.last_created().event_type_id, Some(4242));
}

#[tokio::test]
async fn test_taken_slot_returns_conflict_with_capped_alternatives() {
    let app = TestApp::new();
    let slots = (0..15).map(|i| format!("2025-06-01T{:02}:00:00.000-05:00", 6 + i)).collect();
    *app.scheduling.slots.lock().unwrap() = Canned::Ok(slots);
    let mut submission = airport_submission();
    submission["eventTypeId"] = json!(4242);

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["available"], false);
    assert_eq!(body["error"], "Requested time slot is not available");
    let alternatives = body["availableSlots"].as_array().unwrap();
    assert_eq!(alternatives.len(), 10);
    assert_eq!(alternatives[0], "2025-06-01T06:00:00.000-05:00");
    assert!(app.scheduling.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_availability_is_treated_as_conflict() {
    let app = TestApp::new();
    let mut submission = airport_submission();
    submission["eventTypeId"] = json!(4242);

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["availableSlots"], json!([]));
    assert!(app.scheduling.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_provider_during_gate_is_service_unavailable() {
    let app = TestApp::new();
    *app.scheduling.slots.lock().unwrap() = Canned::Unreachable;
    let mut submission = airport_submission();
    submission["eventTypeId"] = json!(4242);

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert!(app.scheduling.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_provider_rejection_is_surfaced() {
    let app = TestApp::new();
    *app.scheduling.create.lock().unwrap() = Canned::Rejected("User either already has booking at this time or is not available", None);

    let (status, body) = app.post_json("/api/booking", &airport_submission().to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User either already has booking at this time or is not available");
}

#[tokio::test]
async fn test_create_transport_failure_hides_detail() {
    let app = TestApp::new();
    *app.scheduling.create.lock().unwrap() = Canned::Unreachable;

    let (status, body) = app.post_json("/api/booking", &airport_submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal error");
}

#[tokio::test]
async fn test_missing_api_key_fails_before_validation() {
    let app = TestApp::unconfigured();

    let (status, body) = app.post_json("/api/booking", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Cal.com API key is not configured");
}

#[tokio::test]
async fn test_pickup_in_dst_gap_is_rejected() {
    let app = TestApp::new();
    let mut submission = airport_submission();
    submission["date"] = json!("2025-03-09");
    submission["time"] = json!("02:30");

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.scheduling.outbound_calls(), 0);
}

#[tokio::test]
async fn test_zero_event_type_id_skips_slot_check() {
    let app = TestApp::new();
    let mut submission = airport_submission();
    submission["eventTypeId"] = json!(0);

    let (status, body) = app.post_json("/api/booking", &submission.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert!(app.scheduling.slot_calls.lock().unwrap().is_empty());
    let sent = app.scheduling.last_created();
    assert_eq!(sent.event_type_id, None);
    assert_eq!(sent.event_type_slug.as_deref(), Some("airport-transfer"));
}

#[tokio::test]
async fn test_each_attempt_gets_a_fresh_reference() {
    let app = TestApp::new();

    let (_, first) = app.post_json("/api/booking", &airport_submission().to_string()).await;
    let (_, second) = app.post_json("/api/booking", &airport_submission().to_string()).await;

    assert_eq!(app.scheduling.created.lock().unwrap().len(), 2);
    assert_ne!(first["booking"]["reference"], second["booking"]["reference"]);
}

#[tokio::test]
async fn test_availability_probe() {
    let app = TestApp::new();
    *app.scheduling.slots.lock().unwrap() = Canned::Ok(vec!["2025-06-02T09:00:00.000-05:00".into()]);

    let (status, body) = app.get("/api/booking?eventTypeId=4242&start=2025-06-02&end=2025-06-03").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "available": true, "slots": ["2025-06-02T09:00:00.000-05:00"] }));

    let (status, body) = app.get("/api/booking?eventTypeId=4242&start=2025-06-02").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required params: eventTypeId, start, end");
    assert_eq!(app.scheduling.slot_calls.lock().unwrap().len(), 1);
}
