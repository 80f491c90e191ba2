use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use campus_events_server::config::Config;
use campus_events_server::routes::create_routes;
use campus_events_server::state::AppState;
use campus_events_server::store::EventStore;

fn app() -> Router {
    let config = Config {
        today_override: NaiveDate::from_ymd_opt(2024, 10, 1),
        ..Config::default()
    };
    create_routes(AppState::new(config, EventStore::seeded()))
}

async fn send(app: &Router, method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ids(events: &Value) -> Vec<String> {
    events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

fn draft(start: &str, end: &str) -> Value {
    json!({
        "name": "Rust Workshop",
        "description": "Systems programming for beginners",
        "club_id": "club1",
        "location": "Computer Lab A",
        "date": "2024-10-15",
        "start_time": start,
        "end_time": end,
        "visibility": "open",
        "max_attendees": 40,
        "permission_letter": {
            "file_name": "rust-workshop.pdf",
            "content_type": "application/pdf",
            "size_bytes": 20480
        }
    })
}

#[tokio::test]
async fn test_health_check_sets_security_headers() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_locations_are_listed() {
    let (status, body) = send(&app(), "GET", "/api/locations", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"][0], "Main Auditorium");
}

#[tokio::test]
async fn test_login_with_demo_credentials() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "student@college.edu", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "u1");
    assert_eq!(body["data"]["role"], "student");

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "student@college.edu", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn test_registration_rules() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": "Eve", "email": "eve@college.edu", "password": "pw", "role": "college_admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": "Eve", "email": "eve@college.edu", "password": "pw", "role": "student", "clubs": ["club3"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["club_ids"], json!(["club3"]));

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": "Eve again", "email": "eve@college.edu", "password": "pw", "role": "student" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_requests_without_user_are_rejected() {
    let (status, body) = send(&app(), "GET", "/api/events", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn test_student_listing_respects_visibility() {
    let (status, body) = send(&app(), "GET", "/api/events", Some("u1"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["upcoming"]), vec!["1", "2", "5"]);
    assert!(body["data"]["past"].as_array().unwrap().is_empty());
    assert!(body["data"]["upcoming"][0]["permission_letter_url"].is_null());
}

#[tokio::test]
async fn test_listing_filters_by_location() {
    let (status, body) = send(
        &app(),
        "GET",
        "/api/events?location=Student%20Center",
        Some("u1"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["upcoming"]), vec!["5"]);
}

#[tokio::test]
async fn test_live_conflict_check() {
    let app = app();
    let slot = |start: &str, end: &str| {
        json!({ "location": "Computer Lab A", "date": "2024-10-15", "start_time": start, "end_time": end })
    };

    let (status, body) = send(&app, "POST", "/api/events/conflicts", Some("u2"), Some(slot("15:00:00", "17:00:00"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["conflicts"]), vec!["1"]);
    assert_eq!(body["data"]["warning"], "Schedule conflict with: JavaScript Workshop");

    let (status, body) = send(&app, "POST", "/api/events/conflicts", Some("u2"), Some(slot("16:00:00", "18:00:00"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["conflicts"].as_array().unwrap().is_empty());
    assert!(body["data"]["warning"].is_null());

    let (status, _) = send(&app, "POST", "/api/events/conflicts", Some("u2"), Some(slot("17:00:00", "16:00:00"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/events/conflicts", Some("u1"), Some(slot("15:00:00", "17:00:00"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_authoring_blocks_conflicting_submission() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/events", Some("u2"), Some(draft("15:00:00", "17:00:00"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SCHEDULE_CONFLICT");
    assert_eq!(ids(&body["error"]["details"]["conflicts"]), vec!["1"]);

    let (status, body) = send(&app, "POST", "/api/events", Some("u2"), Some(draft("16:00:00", "18:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["approval_state"], "pending");
    assert!(body["data"]["permission_letter_url"].is_null());

    let (_, body) = send(&app, "GET", "/api/events", Some("u3"), None).await;
    let letters: Vec<&Value> = body["data"]["upcoming"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["name"] == "Rust Workshop")
        .map(|e| &e["permission_letter_url"])
        .collect();
    assert_eq!(letters, vec![&json!("/documents/rust-workshop.pdf")]);
}

#[tokio::test]
async fn test_conflicts_with_hidden_event_reveal_only_the_slot() {
    let app = app();
    send(&app, "POST", "/api/events/3/approval", Some("u3"), Some(json!({ "decision": "approve" }))).await;

    let (status, _) = send(&app, "GET", "/api/events/3", Some("u2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let slot = json!({
        "location": "Art Gallery",
        "date": "2024-10-25",
        "start_time": "10:00:00",
        "end_time": "11:00:00"
    });
    let (status, body) = send(&app, "POST", "/api/events/conflicts", Some("u2"), Some(slot)).await;
    assert_eq!(status, StatusCode::OK);
    let conflict = &body["data"]["conflicts"][0];
    assert_eq!(conflict["id"], "3");
    assert_eq!(conflict["start_time"], "10:00:00");
    assert!(conflict.get("attendee_ids").is_none());
    assert!(conflict.get("permission_letter_url").is_none());

    let mut proposal = draft("10:00:00", "11:00:00");
    proposal["location"] = json!("Art Gallery");
    proposal["date"] = json!("2024-10-25");
    let (status, body) = send(&app, "POST", "/api/events", Some("u2"), Some(proposal)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let conflict = &body["error"]["details"]["conflicts"][0];
    assert_eq!(conflict["id"], "3");
    assert!(conflict.get("attendee_ids").is_none());
    assert!(conflict.get("permission_letter_url").is_none());
}

#[tokio::test]
async fn test_rsvp_to_club_only_event_requires_membership() {
    let app = app();
    send(&app, "POST", "/api/events/3/approval", Some("u3"), Some(json!({ "decision": "approve" }))).await;

    let (status, _) = send(&app, "POST", "/api/events/3/rsvp", Some("u1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/api/clubs/club3/join", Some("u1"), None).await;
    let (status, body) = send(&app, "POST", "/api/events/3/rsvp", Some("u1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attendee_ids"], json!(["u1", "u4", "u5"]));
}

#[tokio::test]
async fn test_authoring_validates_draft() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/events", Some("u2"), Some(draft("18:00:00", "16:00:00"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "End time must be after start time");

    let (status, _) = send(&app, "POST", "/api/events", Some("u1"), Some(draft("08:00:00", "09:00:00"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_approval_lifecycle_is_one_way() {
    let app = app();

    let (status, _) = send(&app, "POST", "/api/events/3/approval", Some("u2"), Some(json!({ "decision": "approve" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "POST", "/api/events/3/approval", Some("u3"), Some(json!({ "decision": "approve" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["approval_state"], "approved");

    let (status, body) = send(&app, "POST", "/api/events/3/approval", Some("u3"), Some(json!({ "decision": "reject" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_club_only_event_becomes_visible_after_joining() {
    let app = app();

    let (status, _) = send(&app, "GET", "/api/events/3", Some("u1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/api/events/3/approval", Some("u3"), Some(json!({ "decision": "approve" }))).await;
    let (status, _) = send(&app, "GET", "/api/events/3", Some("u1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/clubs/club3/join", Some("u1"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/events/3", Some("u1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["club"]["name"], "Photography Club");
    assert_eq!(body["data"]["permissions"]["can_rsvp"], true);
}

#[tokio::test]
async fn test_rsvp_flow() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/events/1/rsvp", Some("u7"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attendee_ids"].as_array().unwrap().len(), 4);

    let (status, body) = send(&app, "POST", "/api/events/1/rsvp", Some("u1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "You have already RSVP'd to this event");

    let (status, body) = send(&app, "POST", "/api/events/1/rsvp", Some("u2"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Only students can RSVP to events");
}

#[tokio::test]
async fn test_event_details_for_college_admin() {
    let (status, body) = send(&app(), "GET", "/api/events/3", Some("u3"), None).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["event"]["permission_letter_url"], "/documents/photo-exhibition-permission.pdf");
    assert_eq!(data["permissions"]["can_approve"], true);
    assert_eq!(data["permissions"]["can_reject"], true);
    assert_eq!(data["permissions"]["can_edit"], false);
    assert_eq!(data["permissions"]["can_rsvp"], false);
}

#[tokio::test]
async fn test_club_admin_can_edit_own_event() {
    let app = app();

    let (_, body) = send(&app, "GET", "/api/events/4", Some("u2"), None).await;
    assert_eq!(body["data"]["permissions"]["can_edit"], true);

    let mut edit = draft("15:00:00", "17:30:00");
    edit["location"] = json!("Computer Lab B");
    edit["date"] = json!("2024-10-18");
    edit["name"] = json!("React Advanced Concepts II");
    let (status, body) = send(&app, "PUT", "/api/events/4", Some("u2"), Some(edit.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "React Advanced Concepts II");
    assert_eq!(body["data"]["approval_state"], "pending");

    let (status, _) = send(&app, "PUT", "/api/events/4", Some("u6"), Some(edit)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboards_are_role_scoped() {
    let app = app();

    let (status, _) = send(&app, "GET", "/api/dashboard/college-admin", Some("u1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/dashboard/college-admin", Some("u3"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"]["total_events"], 5);
    assert_eq!(body["data"]["stats"]["pending"], 2);
    assert_eq!(body["data"]["pending"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "GET", "/api/dashboard/club-admin", Some("u2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["upcoming"]), vec!["1"]);
    assert_eq!(ids(&body["data"]["pending"]), vec!["4"]);
}
