//! Paged track table for the playlist preview page.
//!
//! DESIGN
//! ======
//! Rendering only: the page owns fetching, and this component reports pager
//! clicks through `on_page` with the target page index.

use leptos::prelude::*;

use crate::state::playlists::TracksState;
use crate::util::pagination::format_duration;

#[component]
pub fn TrackTable(tracks: RwSignal<TracksState>, on_page: Callback<u32>) -> impl IntoView {
    let pagination = move || tracks.get().pagination;

    view! {
        <table class="track-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Title"</th>
                    <th>"Album"</th>
                    <th>"Duration"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let state = tracks.get();
                    let first = state.pagination.first_index();
                    state
                        .items
                        .into_iter()
                        .zip(first..)
                        .map(|(track, number)| {
                            view! {
                                <tr class="track-table__row">
                                    <td class="track-table__number">{number}</td>
                                    <td>
                                        <span class="track-table__title">{track.name}</span>
                                        <span class="track-table__artist">{track.artist}</span>
                                    </td>
                                    <td class="track-table__album">{track.album}</td>
                                    <td class="track-table__duration">{format_duration(track.duration_ms)}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </tbody>
        </table>
        <Show when=move || pagination().show_controls()>
            <div class="pager">
                <span class="pager__info">
                    {move || {
                        let p = pagination();
                        format!("Showing {}-{} of {} tracks", p.first_index(), p.last_index(), p.total)
                    }}
                </span>
                <button
                    class="btn pager__prev"
                    disabled=move || !pagination().can_prev() || tracks.get().loading
                    on:click=move |_| {
                        if let Some(page) = pagination().prev() {
                            on_page.run(page);
                        }
                    }
                >
                    "Previous"
                </button>
                <span class="pager__page">
                    {move || {
                        let p = pagination();
                        format!("Page {} of {}", p.page + 1, p.total_pages())
                    }}
                </span>
                <button
                    class="btn pager__next"
                    disabled=move || !pagination().can_next() || tracks.get().loading
                    on:click=move |_| {
                        if let Some(page) = pagination().next() {
                            on_page.run(page);
                        }
                    }
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
