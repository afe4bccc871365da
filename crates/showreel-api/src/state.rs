//! Shared application state.

use std::sync::Arc;

use showreel_content::catalog::SceneCatalog;
use showreel_core::access::AccessDirectory;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Directory consulted by the user-validation route.
    pub access_directory: Arc<dyn AccessDirectory>,
    /// Scenes served to the intro page.
    pub intro: Arc<SceneCatalog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(access_directory: Arc<dyn AccessDirectory>, intro: SceneCatalog) -> Self {
        Self {
            access_directory,
            intro: Arc::new(intro),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("intro_scenes", &self.intro.scenes().len())
            .finish_non_exhaustive()
    }
}
