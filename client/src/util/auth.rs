//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical guard behavior: wait while the profile
//! check runs, render once it resolves authenticated, otherwise send the user
//! to the landing page with a reason code, exactly once.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthPhase, AuthState};

/// Why a user was sent back to the landing page (`/?error=<code>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    /// A protected page was opened without a session.
    SessionRequired,
    /// The host rejected the request before render (no session cookie at all).
    AuthenticationRequired,
    /// A data call answered 401 mid-session.
    SessionExpired,
}

impl RedirectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionRequired => "session_required",
            Self::AuthenticationRequired => "authentication_required",
            Self::SessionExpired => "session_expired",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "session_required" => Some(Self::SessionRequired),
            "authentication_required" => Some(Self::AuthenticationRequired),
            "session_expired" => Some(Self::SessionExpired),
            _ => None,
        }
    }
}

pub fn redirect_target(reason: RedirectReason) -> String {
    format!("/?error={}", reason.as_str())
}

/// Landing URL carrying a free-form error, query-encoded.
pub fn error_target(message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("/?error={encoded}")
}

/// Landing-page text for an `error` query value.
pub fn reason_message(code: &str) -> String {
    let text = match RedirectReason::from_code(code) {
        Some(RedirectReason::SessionRequired) => "Connect your Spotify account to continue.",
        Some(RedirectReason::AuthenticationRequired) => "Please sign in to view that page.",
        Some(RedirectReason::SessionExpired) => "Your session has expired. Please connect again.",
        None => match code {
            "auth_failed" => "Authentication failed",
            "exchange_failed" => "Failed to complete authentication",
            other => other,
        },
    };
    text.to_owned()
}

/// What a protected route should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Check not settled yet: show the neutral loading state.
    Pending,
    /// Authenticated: render protected content.
    Render,
    /// Settled and signed out: leave.
    Redirect(RedirectReason),
}

pub fn guard_decision(state: &AuthState) -> GuardDecision {
    match state.phase() {
        AuthPhase::Unchecked | AuthPhase::Loading => GuardDecision::Pending,
        AuthPhase::Resolved if state.is_authenticated() => GuardDecision::Render,
        AuthPhase::Resolved => GuardDecision::Redirect(RedirectReason::SessionRequired),
    }
}

/// Latch that lets a guard redirect at most once.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedirectOnce {
    fired: bool,
}

impl RedirectOnce {
    /// `true` the first time only.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }
}

/// Redirect to the landing page once auth has resolved without a user.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut latch = RedirectOnce::default();
    Effect::new(move || {
        if let GuardDecision::Redirect(reason) = guard_decision(&auth.get()) {
            if latch.fire() {
                navigate(&redirect_target(reason), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    });
}
