//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once by `App` as `RwSignal<AuthState>` context and consumed by
//! the route guard and user-aware pages. Lifecycle is
//! unchecked -> loading -> resolved; every mutation goes through the
//! setters below so `is_authenticated()` can never disagree with `user`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::api::{self, ApiError};
use crate::net::types::UserProfile;

/// Where the store is in its check lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// No profile check has run yet.
    #[default]
    Unchecked,
    /// A profile check is in flight.
    Loading,
    /// The last check (or logout) has settled.
    Resolved,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    user: Option<UserProfile>,
    phase: AuthPhase,
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AuthPhase::Loading
    }

    pub fn begin_check(&mut self) {
        self.phase = AuthPhase::Loading;
    }

    /// Settle a profile check: a user means signed in, `None` clears both.
    pub fn resolve(&mut self, user: Option<UserProfile>) {
        self.user = user;
        self.phase = AuthPhase::Resolved;
    }

    /// Apply the outcome of the profile endpoint. Any failure, network or
    /// status, leaves the store unauthenticated.
    pub fn apply_check(&mut self, result: Result<UserProfile, ApiError>) {
        self.resolve(result.ok());
    }

    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }

    /// Forget the user, e.g. after logout. The store counts as resolved.
    pub fn clear(&mut self) {
        self.resolve(None);
    }
}

/// Refresh the store from `GET /api/spotify/v1/users/details`.
///
/// Never fails: a failed check is recorded as "not authenticated".
pub async fn check_auth(auth: RwSignal<AuthState>) {
    auth.update(AuthState::begin_check);
    let result = api::fetch_current_user().await;
    if let Err(e) = &result {
        leptos::logging::log!("auth check: not signed in ({e})");
    }
    auth.update(|state| state.apply_check(result));
}

/// Best-effort backend logout followed by an unconditional local clear.
pub async fn logout(auth: RwSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        leptos::logging::warn!("logout request failed: {e}");
    }
    auth.update(AuthState::clear);
}
