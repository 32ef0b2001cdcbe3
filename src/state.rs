use std::sync::Arc;

use crate::auth::TokenAuthority;
use crate::database::{MemoryStore, TaskStore, UserStore};

/// Shared, read-only handles every call receives
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenAuthority>,
    pub tasks: Arc<dyn TaskStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(tokens: Arc<dyn TokenAuthority>, tasks: Arc<dyn TaskStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, tasks, users }
    }

    /// Both tables served from one [`MemoryStore`]
    pub fn in_memory(tokens: Arc<dyn TokenAuthority>) -> Self {
        let store = MemoryStore::new();
        Self::new(tokens, Arc::new(store.clone()), Arc::new(store))
    }
}
