//! Offset/limit paging math and row formatting for the playlist track table.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

pub const TRACKS_PER_PAGE: u32 = 50;

/// Zero-based page cursor over a server-paged track list.
///
/// `has_next` comes from the server response and is authoritative for
/// forward navigation; `total` only drives the "x-y of n" labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total: u32,
    pub has_next: bool,
}

impl Pagination {
    pub fn offset(self) -> u32 {
        self.page.saturating_mul(TRACKS_PER_PAGE)
    }

    pub fn total_pages(self) -> u32 {
        self.total.div_ceil(TRACKS_PER_PAGE)
    }

    /// 1-based index of the first row on this page.
    pub fn first_index(self) -> u32 {
        self.offset() + 1
    }

    /// 1-based index of the last row on this page.
    pub fn last_index(self) -> u32 {
        (self.page + 1).saturating_mul(TRACKS_PER_PAGE).min(self.total)
    }

    pub fn can_prev(self) -> bool {
        self.page > 0
    }

    pub fn can_next(self) -> bool {
        self.has_next
    }

    pub fn show_controls(self) -> bool {
        self.total_pages() > 1
    }

    pub fn prev(self) -> Option<u32> {
        self.can_prev().then(|| self.page - 1)
    }

    pub fn next(self) -> Option<u32> {
        self.can_next().then(|| self.page + 1)
    }
}

/// `m:ss` duration label.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

/// Up to two uppercase initials for a cover placeholder.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
