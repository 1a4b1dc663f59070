//! Networking modules for the backend REST API and the popup message channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `auth_message` validates the cross-window auth
//! payload, and `types` defines the backend wire schema.

pub mod api;
pub mod auth_message;
pub mod types;
