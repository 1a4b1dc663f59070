//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed host config and one pooled reqwest client for the API
//! proxy. Clone is required by Axum; both fields are cheap to clone.

use std::sync::Arc;
use std::time::Duration;

use crate::config::HostConfig;
use crate::proxy::ProxyError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: HostConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            // Redirects from the backend belong to the browser.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;
        Ok(Self { config: Arc::new(config), http })
    }
}
