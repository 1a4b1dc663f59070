use super::*;
use crate::net::api::ApiError;

fn playlist(id: &str) -> Playlist {
    Playlist {
        id: id.to_owned(),
        name: "Road Trip".to_owned(),
        description: Some("Songs for the car".to_owned()),
        track_count: 120,
        image_url: None,
        owner_id: "u1".to_owned(),
        owner_name: "Alice".to_owned(),
        public_access: false,
        collaborative: false,
        external_url: String::new(),
    }
}

#[test]
fn lookup_is_loading_before_first_load() {
    let mut state = PlaylistsState::default();
    assert_eq!(lookup_playlist(&state, "p1"), PlaylistLookup::Loading);
    state.begin_load();
    assert_eq!(lookup_playlist(&state, "p1"), PlaylistLookup::Loading);
}

#[test]
fn lookup_finds_playlist_by_id() {
    let mut state = PlaylistsState::default();
    state.apply_load(Ok(vec![playlist("p0"), playlist("p1")]));
    assert_eq!(lookup_playlist(&state, "p1"), PlaylistLookup::Found(playlist("p1")));
}

#[test]
fn lookup_reports_missing_playlist() {
    let mut state = PlaylistsState::default();
    state.apply_load(Ok(vec![playlist("p0")]));
    assert_eq!(lookup_playlist(&state, "nope"), PlaylistLookup::NotFound);
}

#[test]
fn lookup_surfaces_list_failure() {
    let mut state = PlaylistsState::default();
    state.apply_load(Err(ApiError::Network("offline".to_owned())));
    assert_eq!(
        lookup_playlist(&state, "p1"),
        PlaylistLookup::Failed(crate::state::playlists::PLAYLISTS_FAILED_MESSAGE.to_owned())
    );
}

#[test]
fn cached_playlist_survives_a_failed_refresh() {
    let mut state = PlaylistsState::default();
    state.apply_load(Ok(vec![playlist("p1")]));
    state.begin_load();
    state.apply_load(Err(ApiError::Network("offline".to_owned())));
    assert_eq!(lookup_playlist(&state, "p1"), PlaylistLookup::Found(playlist("p1")));
}
