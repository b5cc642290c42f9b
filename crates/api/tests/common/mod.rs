#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use checkin_api::auth::jwt::SessionConfig;
use checkin_api::auth::password::hash_password;
use checkin_api::bootstrap::ensure_admin;
use checkin_api::config::{AdminSeed, LogFormat, ServerConfig};
use checkin_api::router::build_app_router;
use checkin_api::state::AppState;
use checkin_db::models::event::{CreateEvent, Event};
use checkin_db::models::guest::{CreateGuest, Guest};
use checkin_db::models::user::{CreateUser, User};
use checkin_db::{CheckinStore, MemoryStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123456";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:8000".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
            cookie_secure: false,
        },
        admin: None,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack the binary uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create the `admin` / `admin123456` account.
pub async fn seed_admin(store: &MemoryStore) {
    let seed = AdminSeed {
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        email: "admin@mail.com".to_string(),
    };
    ensure_admin(store, &seed)
        .await
        .expect("admin seeding should succeed");
}

/// Create a user directly in the store, bypassing the admin bootstrap.
pub async fn seed_user(
    store: &MemoryStore,
    username: &str,
    password: &str,
    is_active: bool,
) -> User {
    store
        .create_user(&CreateUser {
            username: username.to_string(),
            email: format!("{username}@mail.com"),
            password_hash: hash_password(password).expect("hashing should succeed"),
            is_active,
        })
        .await
        .expect("user creation should succeed")
}

/// Create an active event starting `starts_in_days` from now.
pub async fn seed_event(store: &MemoryStore, name: &str, limit: i32, starts_in_days: i64) -> Event {
    store
        .create_event(&CreateEvent {
            name: name.to_string(),
            limit,
            status: Some(true),
            address: "beijing".to_string(),
            start_time: Utc::now() + Duration::days(starts_in_days),
        })
        .await
        .expect("event creation should succeed")
}

pub async fn seed_guest(store: &MemoryStore, event_id: i64, name: &str, phone: &str) -> Guest {
    store
        .create_guest(&CreateGuest {
            event_id,
            guest_name: name.to_string(),
            phone: phone.to_string(),
            email: format!("{name}@mail.com"),
        })
        .await
        .expect("guest creation should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST with an empty body and no `Content-Type`.
pub async fn post_bare(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

/// POST an already url-encoded form body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form_with_cookie(
    app: Router,
    uri: &str,
    form: &str,
    cookie: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(COOKIE, cookie)
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8")
}

/// The `name=value` pair from a response's `Set-Cookie` header.
pub fn cookie_pair(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

/// Log in as the seeded admin and return the `Cookie` header value.
pub async fn login_cookie(app: Router) -> String {
    let form = format!("username={ADMIN_USERNAME}&password={ADMIN_PASSWORD}");
    let response = post_form(app, "/login_action/", &form).await;
    assert_eq!(response.status(), axum::http::StatusCode::FOUND);
    cookie_pair(&response)
}
