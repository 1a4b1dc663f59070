//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (guard fallback, playlist tiles, track
//! table) while pages own fetching and navigation.

pub mod auth_guard;
pub mod playlist_card;
pub mod track_table;
