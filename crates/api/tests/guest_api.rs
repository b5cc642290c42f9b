//! HTTP-level tests for guest listing, search and registration.

mod common;

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use checkin_db::models::event::CreateEvent;
use checkin_db::{CheckinStore, MemoryStore};
use chrono::{Duration, Utc};
use common::{
    body_json, get, get_with_cookie, login_cookie, post_form_with_cookie, post_json_with_cookie,
    seed_event, seed_guest,
};

async fn setup() -> (Arc<MemoryStore>, axum::Router, String) {
    let store = Arc::new(MemoryStore::new());
    common::seed_admin(&store).await;
    let app = common::build_test_app(Arc::clone(&store));
    let cookie = login_cookie(app.clone()).await;
    (store, app, cookie)
}

fn guest_body(event_id: i64, phone: &str) -> serde_json::Value {
    serde_json::json!({
        "event_id": event_id,
        "guest_name": "alen",
        "phone": phone,
        "email": "alen@mail.com",
    })
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn guest_manage_without_session_redirects_to_login() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = get(app, "/guest_manage/").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/");
}

#[tokio::test]
async fn guest_manage_lists_guests() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    seed_guest(&store, event.id, "alen", "18611001100").await;
    seed_guest(&store, event.id, "una", "18611001101").await;

    let response = get_with_cookie(app, "/guest_manage/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"], "admin");
    let guests = json["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0]["phone"], "18611001100");
    assert_eq!(guests[0]["sign"], false);
}

#[tokio::test]
async fn guest_manage_paginates() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    for i in 0..5 {
        seed_guest(&store, event.id, &format!("guest{i}"), &format!("1861100110{i}")).await;
    }

    let response = get_with_cookie(app, "/guest_manage/?limit=2&offset=3", &cookie).await;
    let json = body_json(response).await;
    let guests = json["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0]["guest_name"], "guest3");
    assert_eq!(guests[1]["guest_name"], "guest4");
}

#[tokio::test]
async fn guest_manage_filters_by_event() {
    let (store, app, cookie) = setup().await;
    let first = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    let second = seed_event(&store, "oneplus4 launch", 2000, 7).await;
    seed_guest(&store, first.id, "alen", "18611001100").await;
    seed_guest(&store, second.id, "una", "18611001101").await;
    seed_guest(&store, second.id, "tom", "18611001102").await;

    let uri = format!("/guest_manage/?event_id={}", second.id);
    let response = get_with_cookie(app, &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let guests = json["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 2);
    assert!(guests.iter().all(|g| g["event_id"] == second.id));
}

#[tokio::test]
async fn search_phone_filters_by_substring() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    seed_guest(&store, event.id, "alen", "18611001100").await;
    seed_guest(&store, event.id, "una", "13800138000").await;

    let response = get_with_cookie(app.clone(), "/search_phone/?phone=186", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let guests = json["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["guest_name"], "alen");

    let response =
        post_form_with_cookie(app, "/search_phone/", "phone=13800138000", &cookie).await;
    let json = body_json(response).await;
    let guests = json["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["guest_name"], "una");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_guest_returns_201() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;

    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(event.id, "18611001100"), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["event_id"], event.id);
    assert_eq!(json["sign"], false);
}

#[tokio::test]
async fn register_guest_rejects_invalid_email() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    let mut body = guest_body(event.id, "18611001100");
    body["email"] = serde_json::json!("not-an-email");

    let response = post_json_with_cookie(app, "/api/guests/", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_guest_for_missing_event_returns_404() {
    let (_store, app, cookie) = setup().await;
    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(42, "18611001100"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_guest_for_closed_event_conflicts() {
    let (store, app, cookie) = setup().await;
    let event = store
        .create_event(&CreateEvent {
            name: "closed".to_string(),
            limit: 100,
            status: Some(false),
            address: "beijing".to_string(),
            start_time: Utc::now() + Duration::days(7),
        })
        .await
        .unwrap();

    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(event.id, "18611001100"), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "event status is not available");
}

#[tokio::test]
async fn register_guest_for_full_event_conflicts() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "tiny", 1, 7).await;
    seed_guest(&store, event.id, "alen", "18611001100").await;

    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(event.id, "18611001101"), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "event number is full");
}

#[tokio::test]
async fn register_guest_for_started_event_conflicts() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "yesterday", 100, -1).await;

    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(event.id, "18611001100"), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "event has started");
}

#[tokio::test]
async fn register_duplicate_phone_conflicts() {
    let (store, app, cookie) = setup().await;
    let event = seed_event(&store, "xiaomi5 launch", 2000, 7).await;
    seed_guest(&store, event.id, "alen", "18611001100").await;

    let response =
        post_json_with_cookie(app, "/api/guests/", guest_body(event.id, "18611001100"), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "the event guest phone number repeat");
}
