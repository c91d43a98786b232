use std::sync::atomic::Ordering;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{GameSession, SessionEvent, SessionState};
use tictactoe_common::log;
use tokio::sync::mpsc;

use crate::messages::{ClientMessage, ServerMessage, StateSnapshot};
use crate::server_config::GameSettings;
use crate::web_server::WebServerState;

/// Each connection owns its own game; nothing is shared between browsers.
pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let connection_id = state.next_connection_id.fetch_add(1, Ordering::Relaxed);
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(32);

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    log!("[conn:{}] Failed to encode server message: {}", connection_id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let rng = SessionRng::from_random();
    let seed = rng.seed();
    let mut session = GameSession::new(state.settings.tie_break, rng);
    log!(
        "[conn:{}] Connected, session seed {}, tie break {:?}",
        connection_id,
        seed,
        session.tie_break()
    );

    if send_snapshot(&tx, &session).await {
        while let Some(result) = ws_receiver.next().await {
            let text = match result {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    log!("[conn:{}] WebSocket error: {}", connection_id, e);
                    break;
                }
            };

            let client_message = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(message) => message,
                Err(e) => {
                    log!("[conn:{}] Ignoring malformed message: {}", connection_id, e);
                    continue;
                }
            };

            if !handle_client_message(connection_id, &mut session, client_message, &state.settings, &tx).await {
                break;
            }
        }
    }

    log!("[conn:{}] Disconnected after {} moves", connection_id, session.moves_played());
    drop(tx);
    if let Err(e) = send_task.await {
        log!("[conn:{}] Send task failed: {}", connection_id, e);
    }
}

/// Returns `false` once the outgoing channel is closed.
pub async fn handle_client_message(
    connection_id: u64,
    session: &mut GameSession,
    message: ClientMessage,
    settings: &GameSettings,
    tx: &mpsc::Sender<ServerMessage>,
) -> bool {
    match message {
        ClientMessage::Place { cell } => {
            match session.submit_human_move(cell) {
                SessionEvent::Rejected => return true,
                SessionEvent::Continued(_) => {
                    log!("[conn:{}] Human placed X at {}", connection_id, cell);
                }
                SessionEvent::Ended(outcome) => {
                    log!("[conn:{}] Human placed X at {}, game over: {:?}", connection_id, cell, outcome);
                }
            }

            if !send_snapshot(tx, session).await {
                return false;
            }

            if session.state() == SessionState::AwaitingComputerMove {
                // Input is not read while the computer is pending, so its move
                // always lands before the next request.
                tokio::time::sleep(settings.computer_move_delay).await;
                let event = match run_computer_turn(session).await {
                    Ok(event) => event,
                    Err(e) => {
                        log!("[conn:{}] Computer move failed: {}", connection_id, e);
                        return false;
                    }
                };
                log!(
                    "[conn:{}] Computer placed O at {:?}",
                    connection_id,
                    session.last_computer_move()
                );
                if let SessionEvent::Ended(outcome) = event {
                    log!("[conn:{}] Game over: {:?}", connection_id, outcome);
                }
                return send_snapshot(tx, session).await;
            }

            true
        }
        ClientMessage::Restart => {
            session.restart();
            log!("[conn:{}] Restarted", connection_id);
            send_snapshot(tx, session).await
        }
    }
}

/// Runs the search on the blocking pool and writes the result back.
async fn run_computer_turn(session: &mut GameSession) -> Result<SessionEvent, String> {
    let mut pending = session.clone();
    let (pending, event) = tokio::task::spawn_blocking(move || {
        let event = pending.run_computer_move();
        (pending, event)
    })
    .await
    .map_err(|e| format!("search task failed: {}", e))?;

    *session = pending;
    Ok(event)
}

async fn send_snapshot(tx: &mpsc::Sender<ServerMessage>, session: &GameSession) -> bool {
    let message = ServerMessage::State(StateSnapshot::from_session(session));
    tx.send(message).await.is_ok()
}
