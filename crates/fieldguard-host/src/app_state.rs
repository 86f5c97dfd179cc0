//! Shared application state for the HTTP surface.

use std::sync::Arc;

use fieldguard_core::error::Result;

use crate::app::ModelApp;
use crate::config::AppConfig;
use crate::obs::GuardMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    app: ModelApp,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report boot errors instead of panicking.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let app = ModelApp::boot(&cfg)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { app }),
        })
    }

    pub fn app(&self) -> &ModelApp {
        &self.inner.app
    }

    pub fn metrics(&self) -> &GuardMetrics {
        self.inner.app.metrics()
    }
}
