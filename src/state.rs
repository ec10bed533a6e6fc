use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::SchedulingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<SchedulingStore>>,
}

impl AppState {
    pub fn new(store: SchedulingStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
