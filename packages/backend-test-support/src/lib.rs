//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: unified logging
//! initialization, a WebSocket test client and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod ws_client;
