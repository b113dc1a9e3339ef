// Real HTTP server on an ephemeral port for WebSocket tests

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend_test_support::ws_client::ClientError;
use speed_backend::config::GameConfig;
use speed_backend::middleware::request_log::RequestLog;
use speed_backend::routes;
use speed_backend::services::results::MemoryResultSink;
use speed_backend::state::app_state::AppState;

/// Short ticks and a fixed seed so matches start fast and deal the same way.
pub fn test_config() -> GameConfig {
    GameConfig {
        countdown_secs: 3,
        tick: Duration::from_millis(20),
        seed: Some(0x5eed),
    }
}

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub addr: SocketAddr,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
    pub state: AppState,
    pub results: Arc<MemoryResultSink>,
}

impl TestServer {
    pub fn ws_url(&self, room_id: &str) -> String {
        format!("ws://{}/ws/{}", self.addr, room_id)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.join.await;
    }
}

/// Start the full route table behind the production middleware, bound to
/// 127.0.0.1 on a random port.
pub async fn start_test_server(config: GameConfig) -> Result<TestServer, ClientError> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let results = Arc::new(MemoryResultSink::new());
    let state = AppState::new(config, results.clone());
    let data = web::Data::new(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer {
        handle,
        addr,
        join,
        state,
        results,
    })
}
