//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, navigation, the
//! handshake listener) and delegates rendering details to `components`.

pub mod callback;
pub mod dashboard;
pub mod landing;
pub mod playlist;
