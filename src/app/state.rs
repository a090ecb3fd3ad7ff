use std::sync::Arc;

use crate::{geo::GeoResolver, managers::session::SessionManager, store::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, geo: GeoResolver) -> Self {
        Self {
            sessions: SessionManager::new(store, geo),
        }
    }
}
