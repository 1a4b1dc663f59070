//! Dashboard page listing the user's Spotify playlists.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route, mounted inside `AuthGuard`. Loads playlist
//! inventory on mount into the shared `PlaylistsState` so the playlist
//! preview page can reuse it.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::playlist_card::PlaylistCard;
use crate::net::api;
use crate::net::types::UserProfile;
use crate::state::auth::{self, AuthState};
use crate::state::playlists::PlaylistsState;

pub const EMPTY_PLAYLISTS_MESSAGE: &str = "No playlists found";

/// Header identity: display name and avatar letter.
pub fn user_badge(user: Option<&UserProfile>) -> (String, String) {
    match user {
        Some(user) => {
            let initial = user.initial().map(String::from).unwrap_or_default();
            (user.display_name.clone(), initial)
        }
        None => (String::new(), String::new()),
    }
}

/// "N playlists · M tracks" summary line.
pub fn playlist_summary(state: &PlaylistsState) -> String {
    let count = state.items.len();
    let noun = if count == 1 { "playlist" } else { "playlists" };
    format!("{count} {noun} · {} tracks", state.total_tracks())
}

pub async fn load_playlists(playlists: RwSignal<PlaylistsState>) {
    playlists.update(PlaylistsState::begin_load);
    let result = api::fetch_playlists().await;
    if let Err(e) = &result {
        leptos::logging::warn!("playlist fetch failed: {e}");
    }
    playlists.update(|s| s.apply_load(result));
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let playlists = expect_context::<RwSignal<PlaylistsState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        leptos::task::spawn_local(load_playlists(playlists));
    });

    let badge = move || auth.with(|a| user_badge(a.user()));

    // Leave the guarded route before the store clears.
    let on_logout = move |_| {
        navigate("/", NavigateOptions::default());
        leptos::task::spawn_local(auth::logout(auth));
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <div class="dashboard-header__user">
                    <span class="avatar">{move || badge().1}</span>
                    <span class="dashboard-header__name">{move || badge().0}</span>
                </div>
                <button class="btn dashboard-header__logout" on:click=on_logout>
                    "Logout"
                </button>
            </header>

            <section class="dashboard-intro">
                <h1>"Your Spotify Playlists"</h1>
                <p class="dashboard-intro__summary">{move || playlists.with(playlist_summary)}</p>
            </section>

            {move || {
                let state = playlists.get();
                if state.loading && !state.loaded {
                    view! { <p class="dashboard-status">"Loading playlists..."</p> }.into_any()
                } else if let Some(error) = state.error {
                    view! { <p class="dashboard-status dashboard-status--error" role="alert">{error}</p> }.into_any()
                } else if state.items.is_empty() {
                    view! { <p class="dashboard-status">{EMPTY_PLAYLISTS_MESSAGE}</p> }.into_any()
                } else {
                    view! {
                        <div class="playlist-grid">
                            {state
                                .items
                                .into_iter()
                                .map(|playlist| view! { <PlaylistCard playlist=playlist/> })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
