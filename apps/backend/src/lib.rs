#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use config::{GameConfig, ServerConfig};
pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use middleware::request_log::RequestLog;
pub use services::results::{LogResultSink, MatchResult, MemoryResultSink, ResultSink};
pub use state::app_state::AppState;
pub use ws::hub::RoomHub;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
