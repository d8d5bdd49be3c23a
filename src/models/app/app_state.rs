use std::sync::Arc;

use crate::db::PortalStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortalStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        AppState { store }
    }
}
