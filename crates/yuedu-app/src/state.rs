use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use yuedu_config::Config;
use yuedu_core::types::RequestId;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Newest text request; results for older ones are stale
    latest_text_request: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            latest_text_request: AtomicU64::new(0),
        }
    }

    pub fn begin_text_request(&self, id: RequestId) {
        self.latest_text_request.store(id, Ordering::SeqCst);
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest_text_request.load(Ordering::SeqCst) == id
    }
}
