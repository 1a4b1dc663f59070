//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `popup` wraps the browser window APIs; `auth` and `pagination` are pure
//! helpers that pages and components share.

pub mod auth;
pub mod pagination;
pub mod popup;
