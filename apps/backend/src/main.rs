use actix_web::{web, App, HttpServer};
use speed_backend::config::{GameConfig, ServerConfig};
use speed_backend::middleware::cors::cors_middleware;
use speed_backend::middleware::request_log::RequestLog;
use speed_backend::routes;
use speed_backend::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let game = match GameConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %server.host,
        port = server.port,
        countdown_secs = game.countdown_secs,
        tick_ms = game.tick.as_millis() as u64,
        fixed_seed = game.seed.is_some(),
        "Starting Speed backend"
    );

    let data = web::Data::new(AppState::with_log_sink(game));
    let origins = server.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
