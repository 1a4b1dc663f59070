//! Cross-window auth message exchanged between the popup and its opener.
//!
//! SYSTEM CONTEXT
//! ==============
//! The callback page posts exactly one `AuthMessage` to the landing page that
//! opened it. `postMessage` is a trust boundary: anything that fails the
//! origin allow-list or the schema check is dropped without a state change.

#[cfg(test)]
#[path = "auth_message_test.rs"]
mod auth_message_test;

use serde::{Deserialize, Serialize};

/// Tag carried in every auth message's `type` field.
pub const AUTH_MESSAGE_TYPE: &str = "SPOTIFY_AUTH_CALLBACK";

/// Dev origins accepted in addition to the configured frontend URL.
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Outcome reported by the callback popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Success,
    Error,
}

/// Single-message protocol payload sent from popup to opener.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AuthStatus,
    pub token: Option<String>,
    pub error: Option<String>,
}

impl AuthMessage {
    pub fn success(token: Option<String>) -> Self {
        Self { kind: AUTH_MESSAGE_TYPE.to_owned(), status: AuthStatus::Success, token, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AUTH_MESSAGE_TYPE.to_owned(),
            status: AuthStatus::Error,
            token: None,
            error: Some(message.into()),
        }
    }

    /// Validate an inbound message body. Returns `None` unless the value is
    /// an object tagged `SPOTIFY_AUTH_CALLBACK` with a known `status`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.get("type").and_then(serde_json::Value::as_str) != Some(AUTH_MESSAGE_TYPE) {
            return None;
        }
        let status = match obj.get("status").and_then(serde_json::Value::as_str)? {
            "success" => AuthStatus::Success,
            "error" => AuthStatus::Error,
            _ => return None,
        };
        let text = |key: &str| {
            obj.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };
        Some(Self { kind: AUTH_MESSAGE_TYPE.to_owned(), status, token: text("token"), error: text("error") })
    }

    /// JSON form handed to `postMessage`.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.kind,
            "status": self.status,
            "token": self.token,
            "error": self.error,
        })
    }
}

/// Explicit list of origins allowed to send or receive auth messages.
///
/// Never holds the `*` wildcard, so a post can't be broadcast to an
/// arbitrary recipient and an inbound check can't be bypassed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginAllowList {
    origins: Vec<String>,
}

impl OriginAllowList {
    pub fn empty() -> Self {
        Self { origins: Vec::new() }
    }

    /// The configured frontend URL (build-time `FRONTEND_URL`) plus the
    /// local dev origins.
    pub fn from_build_env() -> Self {
        Self::with_frontend_url(option_env!("FRONTEND_URL"))
    }

    pub fn with_frontend_url(frontend_url: Option<&str>) -> Self {
        let mut list = Self::empty();
        list.push(frontend_url.unwrap_or(DEV_ORIGINS[0]));
        for origin in DEV_ORIGINS {
            list.push(origin);
        }
        list
    }

    /// Add an origin. Returns `false` for wildcard, `null`, empty or
    /// duplicate entries.
    pub fn push(&mut self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        if origin.is_empty() || origin == "*" || origin == "null" {
            return false;
        }
        if self.origins.iter().any(|o| o == origin) {
            return false;
        }
        self.origins.push(origin.to_owned());
        true
    }

    pub fn contains(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        self.origins.iter().any(|o| o == origin)
    }

    /// Explicit `postMessage` targets for the popup. The opener's origin is
    /// unknown to the popup, so it posts once per allow-listed origin and the
    /// browser delivers only the one that matches.
    pub fn post_targets(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }
}

impl Default for OriginAllowList {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn normalize_origin(origin: &str) -> &str {
    origin.trim().trim_end_matches('/')
}
