//! Handlers for event management, search and creation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use checkin_core::error::CoreError;
use checkin_core::types::DbId;
use checkin_db::models::event::{CreateEvent, Event, EventFilter};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::session::LoginRequired;
use crate::state::AppState;

/// Parameters for `search_name`.
#[derive(Debug, Deserialize)]
pub struct SearchNameParams {
    #[serde(default)]
    pub name: String,
}

/// The event list page payload.
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    /// The logged-in organizer.
    pub user: String,
    pub events: Vec<Event>,
}

/// GET|POST /event_manage/
pub async fn event_manage(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> AppResult<Json<EventListResponse>> {
    let events = state.store.list_events(&EventFilter::default()).await?;
    Ok(Json(EventListResponse {
        user: user.username,
        events,
    }))
}

/// GET|POST /search_name/
///
/// Events whose name contains `name`. An empty `name` lists everything.
pub async fn search_name(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Form(params): Form<SearchNameParams>,
) -> AppResult<Json<EventListResponse>> {
    let name = params.name.trim();
    let filter = EventFilter {
        name: (!name.is_empty()).then(|| name.to_string()),
    };
    let events = state.store.list_events(&filter).await?;
    tracing::debug!(query = %name, hits = events.len(), "Event search");
    Ok(Json(EventListResponse {
        user: user.username,
        events,
    }))
}

/// POST /api/events/
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    input.validate()?;
    let event = state.store.create_event(&input).await?;
    tracing::info!(event_id = event.id, user_id = user.user_id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = state
        .store
        .find_event_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}
