//! Handlers for the guest sign-in kiosk page.
//!
//! Neither endpoint requires a session. Sign-in outcomes are always answered
//! with a 200 and an inline `hint`; only a missing event on the page view is
//! a 404.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::{Form, Json};
use checkin_core::error::CoreError;
use checkin_core::signin::{evaluate, normalize_phone, settle, SignOutcome, SignStep};
use checkin_core::types::DbId;
use checkin_db::models::event::Event;
use checkin_db::models::guest::{Guest, GuestCounts};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Form body for `POST /sign_index_action/{event_id}/`.
#[derive(Debug, Default, Deserialize)]
pub struct SignForm {
    #[serde(default)]
    pub phone: String,
}

/// The kiosk page payload.
#[derive(Debug, Serialize)]
pub struct SignIndexResponse {
    pub event: Event,
    pub counts: GuestCounts,
}

/// Result of a sign-in attempt.
#[derive(Debug, Serialize)]
pub struct SignResponse {
    pub hint: &'static str,
    pub outcome: SignOutcome,
    pub event: Option<Event>,
    /// The matched guest, reflecting the sign flag after this attempt.
    pub guest: Option<Guest>,
    pub counts: Option<GuestCounts>,
}

impl SignResponse {
    fn rejected(outcome: SignOutcome) -> Self {
        Self {
            hint: outcome.message(),
            outcome,
            event: None,
            guest: None,
            counts: None,
        }
    }
}

/// GET /sign_index/{event_id}/
pub async fn sign_index(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<SignIndexResponse>> {
    let event = state
        .store
        .find_event_by_id(event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    let counts = state.store.count_guests(event.id).await?;
    Ok(Json(SignIndexResponse { event, counts }))
}

/// POST /sign_index_action/{event_id}/
pub async fn sign_index_action(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    form: Result<Form<SignForm>, FormRejection>,
) -> AppResult<Json<SignResponse>> {
    // A body that is not url-encoded carries no phone.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(event_id, %rejection, "Sign-in body unreadable");
            SignForm::default()
        }
    };
    let phone = match normalize_phone(&form.phone) {
        Ok(phone) => phone,
        Err(outcome) => return Ok(Json(SignResponse::rejected(outcome))),
    };

    let event = state.store.find_event_by_id(event_id).await?;
    let mut guest = match &event {
        Some(_) => {
            state
                .store
                .find_guest_by_phone_and_event(event_id, phone)
                .await?
        }
        None => None,
    };

    let outcome = match (evaluate(guest.as_ref().map(|g| g.sign)), guest.as_mut()) {
        (SignStep::MarkSigned, Some(g)) => {
            let outcome = settle(state.store.mark_signed(g.id).await?);
            // Signed now, whether by this request or a concurrent one.
            g.sign = true;
            outcome
        }
        (SignStep::MarkSigned, None) => SignOutcome::NotRegistered,
        (SignStep::Reject(outcome), _) => outcome,
    };

    let Some(event) = event else {
        tracing::debug!(event_id, "Sign-in for unknown event");
        return Ok(Json(SignResponse::rejected(outcome)));
    };

    match &guest {
        Some(g) => tracing::info!(event_id, guest_id = g.id, outcome = ?outcome, "Sign-in attempt"),
        None => tracing::info!(event_id, outcome = ?outcome, "Sign-in rejected"),
    }

    let counts = state.store.count_guests(event.id).await?;
    Ok(Json(SignResponse {
        hint: outcome.message(),
        outcome,
        event: Some(event),
        guest,
        counts: Some(counts),
    }))
}
