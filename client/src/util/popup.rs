//! Browser window glue for the popup OAuth handshake.
//!
//! Opens the authorization popup, talks to `window.opener`, and decodes
//! inbound `message` events into JSON. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! SSR paths no-op and report "no window" so server rendering stays
//! deterministic; the callers treat that like a blocked popup.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use crate::net::auth_message::AuthMessage;

pub const POPUP_TARGET: &str = "_blank";
pub const POPUP_FEATURES: &str = "width=500,height=700";

/// Open `url` in a fixed-size popup. Returns `false` if nothing opened.
pub fn open_popup(url: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.open_with_url_and_target_and_features(url, POPUP_TARGET, POPUP_FEATURES).ok())
            .flatten()
            .is_some()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        false
    }
}

#[cfg(feature = "hydrate")]
fn opener() -> Option<web_sys::Window> {
    use wasm_bindgen::JsCast;

    let opener = web_sys::window()?.opener().ok()?;
    if opener.is_null() || opener.is_undefined() {
        return None;
    }
    // Cross-origin openers are WindowProxy objects that fail `instanceof`.
    Some(opener.unchecked_into::<web_sys::Window>())
}

/// Whether this page was opened by another window.
pub fn has_opener() -> bool {
    #[cfg(feature = "hydrate")]
    {
        opener().is_some()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Post `msg` to the opener, restricted to `target_origin`.
pub fn post_to_opener(msg: &AuthMessage, target_origin: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(opener) = opener() else {
            return false;
        };
        let Ok(payload) = js_sys::JSON::parse(&msg.to_value().to_string()) else {
            return false;
        };
        match opener.post_message(&payload, target_origin) {
            Ok(()) => true,
            Err(e) => {
                leptos::logging::warn!("postMessage to opener failed: {e:?}");
                false
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (msg, target_origin);
        false
    }
}

/// Close the current window (only effective for script-opened popups).
pub fn close_window() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.close();
        }
    }
}

/// Decode a `message` event body into JSON. Non-JSON-serializable payloads
/// (functions, ports, cyclic objects) come back as `None`.
#[cfg(feature = "hydrate")]
pub fn message_payload(ev: &web_sys::MessageEvent) -> Option<serde_json::Value> {
    let raw = js_sys::JSON::stringify(&ev.data()).ok()?;
    serde_json::from_str(&String::from(raw)).ok()
}
