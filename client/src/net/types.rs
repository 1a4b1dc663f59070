//! Wire DTOs returned by the PlaySwap backend.
//!
//! DESIGN
//! ======
//! The backend serializes camelCase JSON. These types mirror it field for
//! field so pages never touch raw `serde_json::Value` trees.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Profile of the signed-in Spotify user (`GET /api/spotify/v1/users/details`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
    /// Avatar image URL, when the account has one.
    #[serde(default)]
    pub photo_cover: Option<String>,
    #[serde(default)]
    pub external_urls: String,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl UserProfile {
    /// Uppercased first letter of the display name, used for avatar fallbacks.
    pub fn initial(&self) -> Option<char> {
        self.display_name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// Playlist summary (`GET /api/spotify/v1/playlist/`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub public_access: bool,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub external_url: String,
}

/// One track row in a playlist page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Offset/limit page of tracks (`GET /api/spotify/v1/playlist/{id}/tracks`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTracksPage {
    pub items: Vec<Track>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
    pub has_next: bool,
}

/// Error body the backend attaches to failed responses.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
