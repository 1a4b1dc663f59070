//! Clickable playlist tile for the dashboard grid.

use leptos::prelude::*;

use crate::net::types::Playlist;
use crate::util::pagination::initials;

#[component]
pub fn PlaylistCard(playlist: Playlist) -> impl IntoView {
    let href = format!("/playlist/{}", playlist.id);
    let placeholder = initials(&playlist.name);
    let meta = format!("{} tracks · {}", playlist.track_count, playlist.owner_name);

    view! {
        <a class="playlist-card" href=href>
            <span class="playlist-card__cover">
                {match playlist.image_url {
                    Some(src) => view! { <img src=src alt=playlist.name.clone()/> }.into_any(),
                    None => view! { <span class="playlist-card__initials">{placeholder}</span> }.into_any(),
                }}
            </span>
            <span class="playlist-card__name">{playlist.name.clone()}</span>
            <span class="playlist-card__meta">{meta}</span>
        </a>
    }
}
