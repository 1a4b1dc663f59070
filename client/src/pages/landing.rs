//! Landing page: starts the Spotify popup flow and completes the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Connect Spotify" fetches the authorization URL and opens it in a popup.
//! For the page's lifetime a `message` listener feeds popup messages to the
//! `Initiator` reducer, which filters them and decides when to run the
//! one-and-only session exchange.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::{self, ApiError};
use crate::util::auth::reason_message;
use crate::util::popup;

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to Spotify. Please check if the backend is running.";
pub const POPUP_BLOCKED_MESSAGE: &str = "The sign-in window was blocked. Allow popups for this site and try again.";

pub fn connect_error_message(err: &ApiError) -> String {
    err.user_message(CONNECT_FAILED_MESSAGE)
}

/// Fetch the authorization URL and open it in the popup.
///
/// # Errors
///
/// Returns the user-facing message when the backend call fails or the
/// browser refuses to open the popup.
pub async fn start_authorization() -> Result<(), String> {
    let url = api::fetch_auth_url().await.map_err(|e| {
        leptos::logging::warn!("authorization url request failed: {e}");
        connect_error_message(&e)
    })?;
    if popup::open_popup(&url) {
        Ok(())
    } else {
        Err(POPUP_BLOCKED_MESSAGE.to_owned())
    }
}

#[cfg(feature = "hydrate")]
type SharedInitiator = std::rc::Rc<std::cell::RefCell<crate::state::handshake::Initiator>>;

#[cfg(feature = "hydrate")]
fn run_action<F>(
    action: crate::state::handshake::InitiatorAction,
    initiator: SharedInitiator,
    auth: RwSignal<crate::state::auth::AuthState>,
    error: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
    navigate: F,
) where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    use crate::state::handshake::InitiatorAction;

    match action {
        InitiatorAction::Ignore => {}
        InitiatorAction::ShowError(text) => error.set(Some(text)),
        InitiatorAction::Navigate(route) => navigate(route, NavigateOptions::default()),
        InitiatorAction::Exchange(token) => {
            busy.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                let result = api::exchange_token(&token).await;
                match &result {
                    Ok(()) => crate::state::auth::check_auth(auth).await,
                    Err(e) => leptos::logging::warn!("session exchange failed: {e}"),
                }
                let next = initiator.borrow_mut().on_exchange_result(result);
                busy.set(false);
                run_action(next, initiator, auth, error, busy, navigate);
            });
        }
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        if let Some(code) = query.with(|q| q.get("error")) {
            error.set(Some(reason_message(&code)));
        }
    });

    #[cfg(feature = "hydrate")]
    {
        use crate::net::auth_message::OriginAllowList;
        use crate::state::auth::AuthState;
        use crate::state::handshake::Initiator;

        let auth = expect_context::<RwSignal<AuthState>>();
        let allow = OriginAllowList::from_build_env();
        let initiator: SharedInitiator = std::rc::Rc::new(std::cell::RefCell::new(Initiator::default()));
        let navigate = navigate.clone();
        let handle = window_event_listener(leptos::ev::message, move |ev| {
            let origin = ev.origin();
            let Some(data) = popup::message_payload(&ev) else {
                return;
            };
            let action = initiator.borrow_mut().on_message(&allow, &origin, &data);
            run_action(action, initiator.clone(), auth, error, busy, navigate.clone());
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = navigate;

    let on_connect = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(text) = start_authorization().await {
                error.set(Some(text));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="landing-page">
            <section class="landing-hero">
                <span class="landing-hero__label">"Platform Bridge"</span>
                <h1 class="landing-hero__title">"Transfer your playlists across platforms"</h1>
                <p class="landing-hero__subtitle">
                    "Convert Spotify playlists to YouTube Music seamlessly. Preserve your music collection across streaming services."
                </p>
                <div class="landing-hero__actions">
                    <button class="btn btn--primary btn--lg" on:click=on_connect disabled=move || busy.get()>
                        {move || if busy.get() { "Connecting..." } else { "Connect Spotify" }}
                    </button>
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="landing-hero__error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>
            <section class="landing-features">
                <div class="feature-card">
                    <h3>"Seamless Conversion"</h3>
                    <p>"Transfer your playlists from Spotify to YouTube Music with just a few clicks."</p>
                </div>
                <div class="feature-card">
                    <h3>"Preserve Your Music"</h3>
                    <p>"Keep all your carefully curated playlists safe and accessible on multiple platforms."</p>
                </div>
                <div class="feature-card">
                    <h3>"Fast & Reliable"</h3>
                    <p>"Our optimized conversion process ensures your playlists are transferred quickly and accurately."</p>
                </div>
            </section>
        </div>
    }
}
