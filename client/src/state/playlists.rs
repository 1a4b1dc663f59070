//! Playlist inventory for the dashboard and playlist preview pages.
//!
//! DESIGN
//! ======
//! Kept apart from auth state so a failed playlist fetch never looks like a
//! signed-out user.

#[cfg(test)]
#[path = "playlists_test.rs"]
mod playlists_test;

use crate::net::api::ApiError;
use crate::net::types::{Playlist, PlaylistTracksPage, Track};
use crate::util::pagination::Pagination;

pub const PLAYLISTS_FAILED_MESSAGE: &str = "Failed to load playlists. Please try again later.";
pub const TRACKS_FAILED_MESSAGE: &str = "Failed to load tracks. Please try again.";

/// Playlist list state backed by `GET /api/spotify/v1/playlist/`.
#[derive(Clone, Debug, Default)]
pub struct PlaylistsState {
    pub items: Vec<Playlist>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl PlaylistsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_load(&mut self, result: Result<Vec<Playlist>, ApiError>) {
        self.loading = false;
        self.loaded = true;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(_) => self.error = Some(PLAYLISTS_FAILED_MESSAGE.to_owned()),
        }
    }

    pub fn total_tracks(&self) -> u64 {
        self.items.iter().map(|p| u64::from(p.track_count)).sum()
    }

    pub fn find(&self, id: &str) -> Option<&Playlist> {
        self.items.iter().find(|p| p.id == id)
    }
}

/// One page of a playlist's tracks plus the cursor that produced it.
///
/// Each `begin_page` hands out a request sequence number; `apply_page`
/// drops responses whose number is stale, so fast pager clicks can't show
/// an older page over a newer one. `pagination.page` always describes
/// `items`: the requested page only becomes current once it has loaded.
#[derive(Clone, Debug, Default)]
pub struct TracksState {
    pub items: Vec<Track>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
    request_seq: u64,
    requested_page: u32,
}

impl TracksState {
    pub fn begin_page(&mut self, page: u32) -> u64 {
        self.request_seq += 1;
        self.requested_page = page;
        self.loading = true;
        self.error = None;
        self.request_seq
    }

    /// Offset for the page passed to the latest `begin_page`.
    pub fn requested_offset(&self) -> u32 {
        Pagination { page: self.requested_page, ..self.pagination }.offset()
    }

    /// Returns `false` when the response was stale and ignored.
    pub fn apply_page(&mut self, seq: u64, result: Result<PlaylistTracksPage, ApiError>) -> bool {
        if seq != self.request_seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.pagination.page = self.requested_page;
                self.items = page.items;
                self.pagination.total = page.total;
                self.pagination.has_next = page.has_next;
            }
            Err(e) => self.error = Some(e.user_message(TRACKS_FAILED_MESSAGE)),
        }
        true
    }
}
