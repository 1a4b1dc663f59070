use super::*;

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_deserializes_camel_case_fields() {
    let raw = serde_json::json!({
        "id": "u-1",
        "displayName": "alice",
        "email": "alice@example.com",
        "country": "SE",
        "photoCover": null,
        "externalUrls": "https://open.spotify.com/user/u-1",
        "followersCount": 12,
        "type": "user"
    });
    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.display_name, "alice");
    assert_eq!(profile.photo_cover, None);
    assert_eq!(profile.followers_count, 12);
    assert_eq!(profile.kind, "user");
}

#[test]
fn user_profile_tolerates_missing_optional_fields() {
    let raw = serde_json::json!({ "id": "u-2", "displayName": "bob" });
    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.email, "");
    assert_eq!(profile.followers_count, 0);
}

#[test]
fn user_profile_initial_is_uppercased() {
    let raw = serde_json::json!({ "id": "u-3", "displayName": "carol" });
    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.initial(), Some('C'));
}

#[test]
fn user_profile_initial_uppercases_non_ascii() {
    let raw = serde_json::json!({ "id": "u-5", "displayName": "élodie" });
    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.initial(), Some('É'));
}

#[test]
fn user_profile_initial_empty_name_is_none() {
    let raw = serde_json::json!({ "id": "u-4", "displayName": "" });
    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.initial(), None);
}

// =============================================================
// Playlist + tracks
// =============================================================

#[test]
fn playlist_deserializes_wire_shape() {
    let raw = serde_json::json!({
        "id": "p-1",
        "name": "Road trip",
        "description": null,
        "trackCount": 42,
        "imageUrl": "https://i.scdn.co/image/abc",
        "ownerId": "u-1",
        "ownerName": "alice",
        "publicAccess": true,
        "collaborative": false,
        "externalUrl": "https://open.spotify.com/playlist/p-1"
    });
    let playlist: Playlist = serde_json::from_value(raw).unwrap();
    assert_eq!(playlist.track_count, 42);
    assert_eq!(playlist.description, None);
    assert!(playlist.public_access);
}

#[test]
fn tracks_page_deserializes_has_next() {
    let raw = serde_json::json!({
        "items": [{
            "id": "t-1",
            "name": "Song",
            "artist": "Band",
            "album": "Record",
            "durationMs": 215_000,
            "imageUrl": null
        }],
        "total": 120,
        "limit": 50,
        "offset": 50,
        "hasNext": true
    });
    let page: PlaylistTracksPage = serde_json::from_value(raw).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].duration_ms, 215_000);
    assert!(page.has_next);
    assert_eq!(page.offset, 50);
}
