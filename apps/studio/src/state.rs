use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::editor::Synchronizer;
use crate::export::DocumentGenerator;
use crate::storage::SnapshotStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Every mutation runs to completion under
    /// this lock.
    pub session: Arc<Mutex<Synchronizer>>,
    /// Key-value slot for the saved snapshot. Memory, file or Redis.
    pub store: Arc<dyn SnapshotStore>,
    /// Pluggable document generator. Default: JsonTreeGenerator.
    pub generator: Arc<dyn DocumentGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        session: Synchronizer,
        store: Arc<dyn SnapshotStore>,
        generator: Arc<dyn DocumentGenerator>,
        config: Config,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            store,
            generator,
            config,
        }
    }
}
