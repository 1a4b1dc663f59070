//! Landing-page side of the popup OAuth handshake.
//!
//! DESIGN
//! ======
//! `Initiator` is a plain reducer: the page feeds it raw `message` events and
//! exchange results, and it answers with the one action the page should take.
//! Keeping browser handles out of it lets the filtering and idempotence rules
//! be tested without a window.

#[cfg(test)]
#[path = "handshake_test.rs"]
mod handshake_test;

use crate::net::api::ApiError;
use crate::net::auth_message::{AuthMessage, AuthStatus, OriginAllowList};

pub const NO_TOKEN_MESSAGE: &str = "No token received from authentication";
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";
pub const EXCHANGE_FAILED_MESSAGE: &str = "Failed to complete authentication";
pub const AUTHENTICATED_ROUTE: &str = "/dashboard";

/// What the landing page should do in response to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitiatorAction {
    /// Drop the event; nothing changes.
    Ignore,
    /// Surface a recoverable error to the user.
    ShowError(String),
    /// Call the session exchange endpoint with this token.
    Exchange(String),
    /// Exchange succeeded; go to the authenticated area.
    Navigate(&'static str),
}

/// Per-page handshake state. One instance lives as long as the landing page.
#[derive(Clone, Debug, Default)]
pub struct Initiator {
    exchange_in_flight: bool,
}

impl Initiator {
    pub fn exchange_in_flight(&self) -> bool {
        self.exchange_in_flight
    }

    /// Handle a `message` event with its sender origin and JSON body.
    pub fn on_message(&mut self, allow: &OriginAllowList, origin: &str, data: &serde_json::Value) -> InitiatorAction {
        if !allow.contains(origin) {
            return InitiatorAction::Ignore;
        }
        let Some(msg) = AuthMessage::from_value(data) else {
            return InitiatorAction::Ignore;
        };

        match msg.status {
            AuthStatus::Success => {
                let Some(token) = msg.token.filter(|t| !t.trim().is_empty()) else {
                    return InitiatorAction::ShowError(NO_TOKEN_MESSAGE.to_owned());
                };
                if self.exchange_in_flight {
                    return InitiatorAction::Ignore;
                }
                self.exchange_in_flight = true;
                InitiatorAction::Exchange(token)
            }
            AuthStatus::Error => {
                let text = msg
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_owned());
                InitiatorAction::ShowError(text)
            }
        }
    }

    /// Handle the result of the exchange started by `Exchange`.
    ///
    /// The guard stays set after success so late duplicates are dropped; a
    /// failure releases it so the user can retry.
    pub fn on_exchange_result(&mut self, result: Result<(), ApiError>) -> InitiatorAction {
        match result {
            Ok(()) => InitiatorAction::Navigate(AUTHENTICATED_ROUTE),
            Err(_) => {
                self.exchange_in_flight = false;
                InitiatorAction::ShowError(EXCHANGE_FAILED_MESSAGE.to_owned())
            }
        }
    }
}
