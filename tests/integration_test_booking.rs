mod common;

use axum::http::StatusCode;
use common::{booking_payload, days_from_now, parse_body, TestApp};
use serde_json::json;

fn fields(body: &serde_json::Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_booking_derives_fields() {
    let app = TestApp::new().await;

    let res = app.send("POST", "/api/bookings", Some(booking_payload("Luxury Suite", 10, 5))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "success");

    let data = &body["data"];
    assert_eq!(data["roomType"], "Luxury Suite");
    assert_eq!(data["nights"], 5);
    assert_eq!(data["totalPrice"], 1250.0);
    assert_eq!(data["status"], "Pending");
    assert_eq!(data["guests"], 3);
    assert_eq!(data["checkIn"], days_from_now(10));
    assert_eq!(data["message"], "Please arrange airport pickup and late check-in.");
    assert!(data["id"].as_str().is_some());
    assert!(data["createdAt"].as_str().is_some());

    let reference = data["bookingReference"].as_str().unwrap();
    assert!(reference.starts_with("BK-"));
    assert_eq!(reference.len(), 15);
    assert!(reference[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn test_each_booking_gets_its_own_reference() {
    let app = TestApp::new().await;

    let first = app.create_booking(booking_payload("Deluxe Room", 3, 2)).await;
    let second = app.create_booking(booking_payload("Deluxe Room", 3, 2)).await;

    assert_ne!(first["bookingReference"], second["bookingReference"]);
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_validation_errors_are_all_reported() {
    let app = TestApp::new().await;

    let payload = json!({
        "roomType": "Presidential Suite",
        "name": "A",
        "phone": "abc",
        "email": "nope",
        "checkIn": days_from_now(5),
        "checkOut": days_from_now(5),
        "guests": 15
    });

    let res = app.send("POST", "/api/bookings", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(fields(&body), vec!["roomType", "name", "phone", "email", "checkOut", "guests"]);
}

#[tokio::test]
async fn test_missing_fields_are_reported_not_rejected() {
    let app = TestApp::new().await;

    let res = app.send("POST", "/api/bookings", Some(json!({}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    let reported = fields(&body);
    for field in ["roomType", "name", "phone", "email", "checkIn", "checkOut", "guests"] {
        assert!(reported.iter().any(|f| f == field), "{} not reported", field);
    }
    assert!(!reported.iter().any(|f| f == "message"));
}

#[tokio::test]
async fn test_guests_over_limit() {
    let app = TestApp::new().await;

    let mut payload = booking_payload("VIP Suite", 2, 1);
    payload["guests"] = json!(15);

    let res = app.send("POST", "/api/bookings", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fields(&parse_body(res).await), vec!["guests"]);
}

#[tokio::test]
async fn test_past_check_in_and_long_stays_are_rejected() {
    let app = TestApp::new().await;

    let mut past = booking_payload("Deluxe Room", 0, 2);
    past["checkIn"] = json!(days_from_now(-1));
    let res = app.send("POST", "/api/bookings", Some(past)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fields(&parse_body(res).await), vec!["checkIn"]);

    let res = app.send("POST", "/api/bookings", Some(booking_payload("Deluxe Room", 1, 91))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fields(&parse_body(res).await), vec!["checkOut"]);

    let res = app.send("POST", "/api/bookings", Some(booking_payload("Deluxe Room", 0, 90))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;

    let res = app.send_raw("POST", "/api/bookings", r#"{"name": "Ahmed Khan","#).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Request body is not valid JSON");

    let res = app.send_raw("POST", "/api/bookings", "[1, 2, 3]").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["message"], "Request body must be a JSON object");
}

#[tokio::test]
async fn test_wrong_field_types_are_reported_with_other_errors() {
    let app = TestApp::new().await;

    let mut payload = booking_payload("Deluxe Room", 3, 2);
    payload["guests"] = json!("three");
    payload["email"] = json!("not-an-email");
    payload["name"] = json!(42);

    let res = app.send("POST", "/api/bookings", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(fields(&body), vec!["name", "email", "guests"]);
    assert_eq!(body["errors"][0]["message"], "Name must be a string");
    assert_eq!(body["errors"][2]["message"], "Number of guests must be a whole number");
}

#[tokio::test]
async fn test_guests_as_integer_string_is_accepted() {
    let app = TestApp::new().await;

    let mut payload = booking_payload("Deluxe Room", 3, 2);
    payload["guests"] = json!("3");

    let created = app.create_booking(payload).await;
    assert_eq!(created["guests"], 3);
}

#[tokio::test]
async fn test_get_booking_by_id() {
    let app = TestApp::new().await;
    let created = app.create_booking(booking_payload("Deluxe Room", 4, 3)).await;
    let id = created["id"].as_str().unwrap();

    let res = app.send("GET", &format!("/api/bookings/{}", id), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"], created);

    let res = app.send("GET", "/api/bookings/does-not-exist", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["status"], "error");
}

#[tokio::test]
async fn test_search_by_reference() {
    let app = TestApp::new().await;
    let created = app.create_booking(booking_payload("VIP Suite", 7, 2)).await;
    let reference = created["bookingReference"].as_str().unwrap();

    let res = app.send("GET", &format!("/api/bookings/search/reference?reference={}", reference), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["data"]["id"], created["id"]);

    // lookups are case-insensitive
    let res = app.send(
        "GET",
        &format!("/api/bookings/search/reference?reference={}", reference.to_lowercase()),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.send("GET", "/api/bookings/search/reference?reference=BK-ABC123XYZ456", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.send("GET", "/api/bookings/search/reference", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fields(&parse_body(res).await), vec!["reference"]);
}
