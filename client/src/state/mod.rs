//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `handshake`, `playlists`) so pages can
//! depend on small focused models. `auth` and the playlist list are app-wide
//! context; handshake and track-page state are owned by the page that uses
//! them.

pub mod auth;
pub mod handshake;
pub mod playlists;
