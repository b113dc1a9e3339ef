use std::sync::Arc;

use crate::config::GameConfig;
use crate::services::results::{LogResultSink, ResultSink};
use crate::ws::hub::RoomHub;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<RoomHub>,
}

impl AppState {
    pub fn new(config: GameConfig, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            hub: RoomHub::new(config, sink),
        }
    }

    /// State with the logging result sink.
    pub fn with_log_sink(config: GameConfig) -> Self {
        Self::new(config, Arc::new(LogResultSink))
    }

    pub fn config(&self) -> &GameConfig {
        self.hub.config()
    }
}
