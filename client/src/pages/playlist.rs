//! Playlist preview page: header plus a server-paged track table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/playlist/:id`, mounted inside `AuthGuard`. Playlist metadata comes
//! from the shared list (fetched here if the dashboard hasn't loaded it);
//! tracks are fetched one page at a time.

#[cfg(test)]
#[path = "playlist_test.rs"]
mod playlist_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::track_table::TrackTable;
use crate::net::api;
use crate::net::types::Playlist;
use crate::pages::dashboard::load_playlists;
use crate::state::playlists::{PlaylistsState, TracksState};
use crate::util::pagination::{TRACKS_PER_PAGE, initials};

pub const NOT_FOUND_MESSAGE: &str = "Playlist not found";

/// Header content for the requested id.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaylistLookup {
    Loading,
    Found(Playlist),
    NotFound,
    Failed(String),
}

pub fn lookup_playlist(state: &PlaylistsState, id: &str) -> PlaylistLookup {
    if let Some(playlist) = state.find(id) {
        return PlaylistLookup::Found(playlist.clone());
    }
    if !state.loaded {
        return PlaylistLookup::Loading;
    }
    match &state.error {
        Some(error) => PlaylistLookup::Failed(error.clone()),
        None => PlaylistLookup::NotFound,
    }
}

pub async fn load_tracks(tracks: RwSignal<TracksState>, playlist_id: String, page: u32) {
    let seq = tracks.try_update(|s| s.begin_page(page)).unwrap_or_default();
    let offset = tracks.with_untracked(TracksState::requested_offset);
    let result = api::fetch_playlist_tracks(&playlist_id, offset, TRACKS_PER_PAGE).await;
    if let Err(e) = &result {
        leptos::logging::warn!("track page {page} of {playlist_id} failed: {e}");
    }
    tracks.update(|s| {
        if !s.apply_page(seq, result) {
            leptos::logging::log!("dropped stale track page {page}");
        }
    });
}

#[component]
pub fn PlaylistPage() -> impl IntoView {
    let params = use_params_map();
    let playlists = expect_context::<RwSignal<PlaylistsState>>();
    let tracks = RwSignal::new(TracksState::default());
    let playlist_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());

    Effect::new(move || {
        if !playlists.with_untracked(|s| s.loaded || s.loading) {
            leptos::task::spawn_local(load_playlists(playlists));
        }
    });

    Effect::new(move || {
        let id = playlist_id.get();
        if id.is_empty() {
            return;
        }
        leptos::task::spawn_local(load_tracks(tracks, id, 0));
    });

    let on_page = Callback::new(move |page: u32| {
        leptos::task::spawn_local(load_tracks(tracks, playlist_id.get_untracked(), page));
    });

    let lookup = Memo::new(move |_| playlists.with(|s| lookup_playlist(s, &playlist_id.get())));

    view! {
        <div class="playlist-page">
            <a class="playlist-page__back" href="/dashboard">"Back to playlists"</a>
            {move || match lookup.get() {
                PlaylistLookup::Loading => view! { <p class="playlist-status">"Loading playlist..."</p> }.into_any(),
                PlaylistLookup::NotFound => {
                    view! { <p class="playlist-status playlist-status--error">{NOT_FOUND_MESSAGE}</p> }.into_any()
                }
                PlaylistLookup::Failed(error) => {
                    view! { <p class="playlist-status playlist-status--error" role="alert">{error}</p> }.into_any()
                }
                PlaylistLookup::Found(playlist) => {
                    let placeholder = initials(&playlist.name);
                    let meta = format!("{} · {} tracks", playlist.owner_name, playlist.track_count);
                    view! {
                        <header class="playlist-header">
                            <span class="playlist-header__cover">
                                {match playlist.image_url.clone() {
                                    Some(src) => view! { <img src=src alt=playlist.name.clone()/> }.into_any(),
                                    None => view! { <span class="playlist-header__initials">{placeholder}</span> }.into_any(),
                                }}
                            </span>
                            <div class="playlist-header__text">
                                <h1>{playlist.name.clone()}</h1>
                                <p class="playlist-header__description">{playlist.description.clone().unwrap_or_default()}</p>
                                <p class="playlist-header__meta">{meta}</p>
                            </div>
                            // Conversion runs on the backend; no client action yet.
                            <button class="btn btn--primary" disabled=true>"Convert to YouTube"</button>
                        </header>
                    }
                        .into_any()
                }
            }}
            <Show when=move || tracks.with(|t| t.error.is_some())>
                <p class="playlist-status playlist-status--error" role="alert">
                    {move || tracks.with(|t| t.error.clone().unwrap_or_default())}
                </p>
            </Show>
            <Show
                when=move || !tracks.with(|t| t.loading && t.items.is_empty())
                fallback=|| view! { <p class="playlist-status">"Loading tracks..."</p> }
            >
                <TrackTable tracks=tracks on_page=on_page/>
            </Show>
        </div>
    }
}
