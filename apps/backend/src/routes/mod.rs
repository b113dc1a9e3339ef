use actix_web::web;

pub mod health;
pub mod realtime;

/// Configure every application route. `main.rs` and the integration tests
/// both mount this under the same middleware stack.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Match sockets: /ws/{room_id}
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
