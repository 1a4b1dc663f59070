//! OAuth callback page loaded inside the authorization popup.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend redirects the popup here with the outcome in the query string.
//! The page resolves it once, reports it to `window.opener` with a single
//! origin-restricted `postMessage`, and closes itself after a short countdown.
//! Opened directly (no opener), it finishes the flow in place instead.
//!
//! Query contract: `token` + `error` is canonical. `status` + `error` /
//! `message` is the legacy form; legacy success carries no token.

#[cfg(test)]
#[path = "callback_test.rs"]
mod callback_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api;
use crate::net::auth_message::{AuthMessage, OriginAllowList};
use crate::state::handshake::{AUTH_FAILED_MESSAGE, AUTHENTICATED_ROUTE};
use crate::util::auth::error_target;
use crate::util::popup;

/// Seconds before the popup closes itself.
pub const CLOSE_COUNTDOWN_SECS: u32 = 3;
pub const NO_TOKEN_RECEIVED: &str = "No token received";

/// Raw callback query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

impl CallbackParams {
    pub fn from_query(get: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| get(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        Self { token: read("token"), error: read("error"), status: read("status"), message: read("message") }
    }
}

/// Tri-state popup status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CallbackStatus {
    #[default]
    Loading,
    Success { token: Option<String> },
    Error(String),
}

impl CallbackStatus {
    /// The message to post once resolved; `None` while loading.
    pub fn message(&self) -> Option<AuthMessage> {
        match self {
            Self::Loading => None,
            Self::Success { token } => Some(AuthMessage::success(token.clone())),
            Self::Error(text) => Some(AuthMessage::error(text.clone())),
        }
    }
}

pub fn resolve_callback(params: &CallbackParams) -> CallbackStatus {
    if let Some(error) = params.error.as_ref().or(params.message.as_ref()) {
        return CallbackStatus::Error(error.clone());
    }
    if let Some(token) = &params.token {
        return CallbackStatus::Success { token: Some(token.clone()) };
    }
    match params.status.as_deref() {
        Some("success") => CallbackStatus::Success { token: None },
        Some(_) => CallbackStatus::Error(AUTH_FAILED_MESSAGE.to_owned()),
        None => CallbackStatus::Error(NO_TOKEN_RECEIVED.to_owned()),
    }
}

/// How to finish when there is no opener to report to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectFinish {
    /// Exchange the token here, then go to the authenticated area.
    Exchange(String),
    /// Client-side navigation only.
    Navigate(String),
}

pub fn direct_finish(status: &CallbackStatus) -> Option<DirectFinish> {
    match status {
        CallbackStatus::Loading => None,
        CallbackStatus::Success { token: Some(token) } => Some(DirectFinish::Exchange(token.clone())),
        // Legacy success: the route guard verifies the session.
        CallbackStatus::Success { token: None } => Some(DirectFinish::Navigate(AUTHENTICATED_ROUTE.to_owned())),
        CallbackStatus::Error(text) => Some(DirectFinish::Navigate(error_target(text))),
    }
}

/// Fixed-length one-second countdown before the popup closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    pub fn remaining(self) -> u32 {
        self.remaining
    }

    /// Advance one second. Returns `true` once the countdown has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

fn start_countdown(remaining: RwSignal<Option<u32>>) {
    remaining.set(Some(CLOSE_COUNTDOWN_SECS));
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let mut countdown = Countdown::new(CLOSE_COUNTDOWN_SECS);
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
            let expired = countdown.tick();
            remaining.set(Some(countdown.remaining()));
            if expired {
                popup::close_window();
                break;
            }
        }
    });
}

#[component]
pub fn CallbackPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();
    let status = RwSignal::new(CallbackStatus::Loading);
    let remaining = RwSignal::new(None::<u32>);
    let allow = OriginAllowList::from_build_env();

    let mut reported = false;
    Effect::new(move || {
        if std::mem::replace(&mut reported, true) {
            return;
        }
        let params = CallbackParams::from_query(|key| query.with_untracked(|q| q.get(key)));
        let resolved = resolve_callback(&params);
        status.set(resolved.clone());
        let Some(msg) = resolved.message() else {
            return;
        };

        if popup::has_opener() {
            let posted = allow.post_targets().filter(|target| popup::post_to_opener(&msg, target)).count();
            if posted > 0 {
                start_countdown(remaining);
                return;
            }
            leptos::logging::warn!("could not post the callback result to the opener; finishing in place");
        }

        let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
        match direct_finish(&resolved) {
            Some(DirectFinish::Navigate(route)) => navigate(&route, replace),
            Some(DirectFinish::Exchange(token)) => {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let route = match api::exchange_token(&token).await {
                        Ok(()) => AUTHENTICATED_ROUTE.to_owned(),
                        Err(e) => {
                            leptos::logging::warn!("session exchange failed: {e}");
                            error_target("exchange_failed")
                        }
                    };
                    navigate(&route, replace);
                });
            }
            None => {}
        }
    });

    let heading = move || match status.get() {
        CallbackStatus::Loading => "Completing sign-in...",
        CallbackStatus::Success { .. } => "Authentication Successful!",
        CallbackStatus::Error(_) => "Authentication Failed",
    };
    let detail = move || match status.get() {
        CallbackStatus::Loading => String::new(),
        CallbackStatus::Success { .. } => "Your Spotify account has been connected successfully.".to_owned(),
        CallbackStatus::Error(text) => text,
    };

    view! {
        <div class="callback-page">
            <div class="callback-card">
                <h2 class="callback-card__title">{heading}</h2>
                <p class="callback-card__detail">{detail}</p>
                <Show when=move || remaining.get().is_some()>
                    <p class="callback-card__countdown">
                        {move || {
                            let secs = remaining.get().unwrap_or_default();
                            format!("This window will close automatically in {secs} seconds...")
                        }}
                    </p>
                    <button class="callback-card__close" on:click=move |_| popup::close_window()>
                        "Click here to close manually"
                    </button>
                </Show>
            </div>
        </div>
    }
}
