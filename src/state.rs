//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::storage::{ContentBackend, GithubContentsClient};

/// Shared application state
///
/// Immutable after startup; handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    backend: Arc<dyn ContentBackend>,
}

impl AppState {
    /// Create state talking to the backend named in the configuration
    pub fn new(config: Config) -> Self {
        let backend = GithubContentsClient::new(
            &config.backend.api_url,
            &config.backend.default_user_agent,
        );
        Self::with_backend(config, Arc::new(backend))
    }

    /// Create state with an explicit backend
    pub fn with_backend(config: Config, backend: Arc<dyn ContentBackend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the content backend
    pub fn backend(&self) -> &dyn ContentBackend {
        self.inner.backend.as_ref()
    }
}
