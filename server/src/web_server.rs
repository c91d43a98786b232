use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use tictactoe_common::log;
use tower_http::services::ServeDir;

use crate::server_config::{GameSettings, ServerConfig};
use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct WebServerState {
    pub settings: GameSettings,
    pub next_connection_id: Arc<AtomicU64>,
}

pub async fn run_web_server(
    config: ServerConfig,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let state = WebServerState {
        settings: GameSettings::from(&config),
        next_connection_id: Arc::new(AtomicU64::new(1)),
    };

    let app = Router::new()
        .route("/ws", get(ws_upgrade_handler))
        .fallback_service(ServeDir::new(&config.static_files_path))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", config.address, e))?;

    log!(
        "Tic-tac-toe server listening on http://{} (static files: {})",
        config.address,
        config.static_files_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}
