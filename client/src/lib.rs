//! # playswap-client
//!
//! Leptos + WASM frontend for PlaySwap, the Spotify to YouTube Music
//! playlist bridge.
//!
//! This crate contains pages, components, application state, REST wrappers,
//! and the popup OAuth handshake. It builds for the browser with `hydrate`
//! and for the host server's SSR pass with `ssr`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
