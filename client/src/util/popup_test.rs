#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn open_popup_reports_failure_without_window() {
    assert!(!open_popup("https://accounts.spotify.com/authorize"));
}

#[test]
fn no_opener_outside_browser() {
    assert!(!has_opener());
    assert!(!post_to_opener(&AuthMessage::success(Some("tok".to_owned())), "http://localhost:3000"));
}

#[test]
fn close_window_is_noop_but_callable() {
    close_window();
}
