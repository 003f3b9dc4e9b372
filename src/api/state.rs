//! Application state for the CRS scoring engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ScoringConfig};
use crate::models::CutoffScores;

/// Shared application state.
///
/// Holds the session configuration and cutoffs. Both are read-only once the
/// server starts; the configuration may be absent, in which case every
/// request must carry its own snapshot.
#[derive(Clone)]
pub struct AppState {
    config: Option<Arc<ScoringConfig>>,
    cutoffs: Arc<CutoffScores>,
}

impl AppState {
    /// Creates a state with a session configuration and cutoffs.
    pub fn new(config: ScoringConfig, cutoffs: CutoffScores) -> Self {
        Self {
            config: Some(Arc::new(config)),
            cutoffs: Arc::new(cutoffs),
        }
    }

    /// Creates a state from a loaded configuration directory.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        let (config, cutoffs) = loader.into_parts();
        Self::new(config, cutoffs)
    }

    /// Creates a state with no session configuration.
    pub fn without_config(cutoffs: CutoffScores) -> Self {
        Self {
            config: None,
            cutoffs: Arc::new(cutoffs),
        }
    }

    /// Returns the session configuration, if one is loaded.
    pub fn config(&self) -> Option<&ScoringConfig> {
        self.config.as_deref()
    }

    /// Returns the session cutoffs.
    pub fn cutoffs(&self) -> &CutoffScores {
        &self.cutoffs
    }
}
