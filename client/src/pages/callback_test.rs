use super::*;
use crate::net::auth_message::AuthStatus;

fn params(pairs: &[(&str, &str)]) -> CallbackParams {
    CallbackParams::from_query(|key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    })
}

// =============================================================
// Query parsing
// =============================================================

#[test]
fn from_query_trims_and_drops_empty_values() {
    let p = params(&[("token", "  tok  "), ("error", "")]);
    assert_eq!(p.token.as_deref(), Some("tok"));
    assert_eq!(p.error, None);
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn token_resolves_to_success() {
    assert_eq!(
        resolve_callback(&params(&[("token", "tok-1")])),
        CallbackStatus::Success { token: Some("tok-1".to_owned()) }
    );
}

#[test]
fn error_param_wins_over_token() {
    assert_eq!(
        resolve_callback(&params(&[("token", "tok"), ("error", "access_denied")])),
        CallbackStatus::Error("access_denied".to_owned())
    );
}

#[test]
fn legacy_success_has_no_token() {
    assert_eq!(
        resolve_callback(&params(&[("status", "success")])),
        CallbackStatus::Success { token: None }
    );
}

#[test]
fn legacy_message_is_reported_as_error() {
    assert_eq!(
        resolve_callback(&params(&[("status", "error"), ("message", "state mismatch")])),
        CallbackStatus::Error("state mismatch".to_owned())
    );
}

#[test]
fn legacy_failure_without_text_uses_default() {
    assert_eq!(
        resolve_callback(&params(&[("status", "error")])),
        CallbackStatus::Error(AUTH_FAILED_MESSAGE.to_owned())
    );
}

#[test]
fn empty_query_means_no_token_received() {
    assert_eq!(resolve_callback(&params(&[])), CallbackStatus::Error(NO_TOKEN_RECEIVED.to_owned()));
}

// =============================================================
// Posted message
// =============================================================

#[test]
fn loading_posts_nothing() {
    assert_eq!(CallbackStatus::Loading.message(), None);
}

#[test]
fn status_success_posts_success_message() {
    let msg = resolve_callback(&params(&[("status", "success")])).message().unwrap();
    assert_eq!(msg.kind, "SPOTIFY_AUTH_CALLBACK");
    assert_eq!(msg.status, AuthStatus::Success);
    assert_eq!(msg.token, None);
}

#[test]
fn access_denied_posts_error_message() {
    let msg = resolve_callback(&params(&[("error", "access_denied")])).message().unwrap();
    assert_eq!(msg.status, AuthStatus::Error);
    assert_eq!(msg.error.as_deref(), Some("access_denied"));
    assert_eq!(msg.token, None);
}

// =============================================================
// Direct navigation (no opener)
// =============================================================

#[test]
fn direct_success_with_token_exchanges_in_place() {
    let status = CallbackStatus::Success { token: Some("tok".to_owned()) };
    assert_eq!(direct_finish(&status), Some(DirectFinish::Exchange("tok".to_owned())));
}

#[test]
fn direct_legacy_success_navigates_to_dashboard() {
    let status = CallbackStatus::Success { token: None };
    assert_eq!(direct_finish(&status), Some(DirectFinish::Navigate("/dashboard".to_owned())));
}

#[test]
fn direct_error_navigates_home_with_encoded_error() {
    let status = CallbackStatus::Error(NO_TOKEN_RECEIVED.to_owned());
    assert_eq!(direct_finish(&status), Some(DirectFinish::Navigate("/?error=No+token+received".to_owned())));
}

#[test]
fn direct_finish_waits_while_loading() {
    assert_eq!(direct_finish(&CallbackStatus::Loading), None);
}

// =============================================================
// Countdown
// =============================================================

#[test]
fn countdown_window_is_three_to_five_seconds() {
    assert!((3..=5).contains(&CLOSE_COUNTDOWN_SECS));
}

#[test]
fn countdown_expires_after_configured_ticks() {
    let mut countdown = Countdown::new(CLOSE_COUNTDOWN_SECS);
    let mut ticks = 0;
    while !countdown.tick() {
        ticks += 1;
        assert!(ticks < 10, "countdown never expired");
    }
    assert_eq!(ticks + 1, CLOSE_COUNTDOWN_SECS);
    assert_eq!(countdown.remaining(), 0);
}

#[test]
fn countdown_stays_expired() {
    let mut countdown = Countdown::new(1);
    assert!(countdown.tick());
    assert!(countdown.tick());
    assert_eq!(countdown.remaining(), 0);
}
