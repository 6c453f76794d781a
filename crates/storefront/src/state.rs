//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DevServerConfig;
use crate::proxy::DevProxy;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the dev proxy.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DevServerConfig,
    proxy: DevProxy,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if a proxy HTTP client cannot be built.
    pub fn new(config: DevServerConfig) -> Result<Self, reqwest::Error> {
        let proxy = DevProxy::new(&config.proxy)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, proxy }),
        })
    }

    /// Get a reference to the dev server configuration.
    #[must_use]
    pub fn config(&self) -> &DevServerConfig {
        &self.inner.config
    }

    /// Get a reference to the dev proxy.
    #[must_use]
    pub fn proxy(&self) -> &DevProxy {
        &self.inner.proxy
    }
}
