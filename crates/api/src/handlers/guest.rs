//! Handlers for guest management, search and registration.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use checkin_core::error::CoreError;
use checkin_core::registration::{check_registration, RegistrationWindow, MSG_PHONE_REPEAT};
use checkin_core::types::DbId;
use checkin_db::models::guest::{CreateGuest, Guest, GuestFilter};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::session::LoginRequired;
use crate::state::AppState;

/// Pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the store via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query for `guest_manage`: pagination plus an optional event narrowing.
#[derive(Debug, Default, Deserialize)]
pub struct GuestListParams {
    pub event_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parameters for `search_phone`.
#[derive(Debug, Deserialize)]
pub struct SearchPhoneParams {
    #[serde(default)]
    pub phone: String,
}

/// The guest list page payload.
#[derive(Debug, Serialize)]
pub struct GuestListResponse {
    /// The logged-in organizer.
    pub user: String,
    pub guests: Vec<Guest>,
}

/// GET|POST /guest_manage/
///
/// `?event_id=` limits the list to one event's guests.
pub async fn guest_manage(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Query(params): Query<GuestListParams>,
) -> AppResult<Json<GuestListResponse>> {
    let filter = GuestFilter {
        event_id: params.event_id,
        limit: params.limit,
        offset: params.offset,
        ..GuestFilter::default()
    };
    let guests = state.store.list_guests(&filter).await?;
    Ok(Json(GuestListResponse {
        user: user.username,
        guests,
    }))
}

/// GET|POST /search_phone/
///
/// Guests whose phone contains `phone`. An empty `phone` lists everything.
pub async fn search_phone(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Query(page): Query<PaginationParams>,
    Form(params): Form<SearchPhoneParams>,
) -> AppResult<Json<GuestListResponse>> {
    let phone = params.phone.trim();
    let filter = GuestFilter {
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        limit: page.limit,
        offset: page.offset,
        ..GuestFilter::default()
    };
    let guests = state.store.list_guests(&filter).await?;
    tracing::debug!(query = %phone, hits = guests.len(), "Guest search");
    Ok(Json(GuestListResponse {
        user: user.username,
        guests,
    }))
}

/// POST /api/guests/
///
/// Registers a guest after checking the event is active, not full, not
/// started, and does not already have the phone on its list.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateGuest>,
) -> AppResult<(StatusCode, Json<Guest>)> {
    input.validate()?;

    let event = state
        .store
        .find_event_by_id(input.event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: input.event_id,
        }))?;

    let counts = state.store.count_guests(event.id).await?;
    let window = RegistrationWindow {
        status: event.status,
        limit: event.limit,
        registered: counts.total,
        start_time: event.start_time,
    };
    check_registration(&window, Utc::now())?;

    if state
        .store
        .find_guest_by_phone_and_event(event.id, &input.phone)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(MSG_PHONE_REPEAT.into())));
    }

    let guest = state.store.create_guest(&input).await?;
    tracing::info!(
        guest_id = guest.id,
        event_id = event.id,
        user_id = user.user_id,
        "Guest registered"
    );
    Ok((StatusCode::CREATED, Json(guest)))
}
