use std::sync::Arc;

use crate::{
    engine::RecommendationEngine,
    services::MetadataProvider,
    store::{SessionStore, UserStore},
};

/// How many recommendations a session starts with and how "load more" grows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub default_page_size: usize,
    pub page_step: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            page_step: 5,
        }
    }
}

/// Shared application state
///
/// The engine is fitted once at startup and only read afterwards. User and
/// session data are the mutable parts, each behind its own store.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub users: Arc<dyn UserStore>,
    pub sessions: SessionStore,
    pub metadata: Arc<dyn MetadataProvider>,
    pub paging: Paging,
}

impl AppState {
    pub fn new(
        engine: Arc<RecommendationEngine>,
        users: Arc<dyn UserStore>,
        metadata: Arc<dyn MetadataProvider>,
        paging: Paging,
    ) -> Self {
        Self {
            engine,
            users,
            sessions: SessionStore::new(),
            metadata,
            paging,
        }
    }

    /// Replaces the default session store, e.g. to change the session lifetime
    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}
