//! Guest sign-in decision rules.
//!
//! A sign-in attempt is resolved in three stages:
//!
//! 1. [`normalize_phone`] rejects an empty phone before any lookup happens.
//! 2. [`evaluate`] inspects the `(event_id, phone)` lookup result.
//! 3. [`settle`] turns the result of the conditional `sign = true` update
//!    into the final outcome.
//!
//! Every outcome is reported to the client as an inline message on a 200
//! response; see [`SignOutcome::message`].

use serde::Serialize;

/// Message for an empty phone parameter.
pub const MSG_PHONE_ERROR: &str = "phone error.";

/// Message when no guest matches the `(event_id, phone)` pair.
pub const MSG_EVENT_OR_PHONE_ERROR: &str = "event id or phone error.";

/// Message when the matching guest has already signed in.
pub const MSG_ALREADY_SIGNED: &str = "user has sign in.";

/// Message for a successful sign-in.
pub const MSG_SIGN_SUCCESS: &str = "sign in success!";

/// Final result of a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOutcome {
    PhoneMissing,
    NotRegistered,
    AlreadySigned,
    Signed,
}

impl SignOutcome {
    /// The inline hint shown to the guest.
    pub fn message(self) -> &'static str {
        match self {
            SignOutcome::PhoneMissing => MSG_PHONE_ERROR,
            SignOutcome::NotRegistered => MSG_EVENT_OR_PHONE_ERROR,
            SignOutcome::AlreadySigned => MSG_ALREADY_SIGNED,
            SignOutcome::Signed => MSG_SIGN_SUCCESS,
        }
    }
}

/// What the caller should do after looking up the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStep {
    /// Stop and report the outcome without touching the guest row.
    Reject(SignOutcome),
    /// Attempt the `false -> true` transition.
    MarkSigned,
}

/// Trim the submitted phone, rejecting it when nothing is left.
pub fn normalize_phone(phone: &str) -> Result<&str, SignOutcome> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(SignOutcome::PhoneMissing);
    }
    Ok(phone)
}

/// Decide the next step from the guest lookup.
///
/// `current_sign` is `None` when no guest is registered for the pair,
/// otherwise the guest's current `sign` flag.
pub fn evaluate(current_sign: Option<bool>) -> SignStep {
    match current_sign {
        None => SignStep::Reject(SignOutcome::NotRegistered),
        Some(true) => SignStep::Reject(SignOutcome::AlreadySigned),
        Some(false) => SignStep::MarkSigned,
    }
}

/// Resolve the outcome of the conditional update.
///
/// The update only matches rows with `sign = false`, so `updated == false`
/// means another request signed the guest in first.
pub fn settle(updated: bool) -> SignOutcome {
    if updated {
        SignOutcome::Signed
    } else {
        SignOutcome::AlreadySigned
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_phone_is_rejected() {
        assert_eq!(normalize_phone(""), Err(SignOutcome::PhoneMissing));
        assert_eq!(normalize_phone("   "), Err(SignOutcome::PhoneMissing));
    }

    #[test]
    fn phone_is_trimmed() {
        assert_eq!(normalize_phone(" 18611001100 "), Ok("18611001100"));
    }

    #[test]
    fn unknown_guest_is_not_registered() {
        assert_matches!(evaluate(None), SignStep::Reject(SignOutcome::NotRegistered));
    }

    #[test]
    fn signed_guest_is_not_signed_again() {
        assert_matches!(
            evaluate(Some(true)),
            SignStep::Reject(SignOutcome::AlreadySigned)
        );
    }

    #[test]
    fn unsigned_guest_proceeds() {
        assert_eq!(evaluate(Some(false)), SignStep::MarkSigned);
    }

    #[test]
    fn lost_update_reports_already_signed() {
        assert_eq!(settle(true), SignOutcome::Signed);
        assert_eq!(settle(false), SignOutcome::AlreadySigned);
    }

    #[test]
    fn messages_match_the_page_hints() {
        assert_eq!(SignOutcome::PhoneMissing.message(), "phone error.");
        assert_eq!(SignOutcome::NotRegistered.message(), "event id or phone error.");
        assert_eq!(SignOutcome::AlreadySigned.message(), "user has sign in.");
        assert_eq!(SignOutcome::Signed.message(), "sign in success!");
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&SignOutcome::AlreadySigned).unwrap();
        assert_eq!(json, "\"already_signed\"");
    }
}
