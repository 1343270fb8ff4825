//! WebSocket connection handling

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, Query, State};
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::AppState;
use crate::error::ServerError;

use super::handler::SessionHandler;
use super::protocol::ServerMessage;

/// Query parameters accepted on `/ws`
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    /// Bind the connection to this task immediately
    #[serde(default)]
    pub task_id: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, peer, query))
}

/// Handle a WebSocket connection
async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    peer: SocketAddr,
    query: ConnectQuery,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut handler = SessionHandler::new(state);

    info!("WebSocket client {} connected", peer);

    if let Some(task_id) = query.task_id.as_deref() {
        let messages = handler.open(task_id);
        if let Err(e) = send_all(&mut sender, messages).await {
            error!("Failed to send opening prompt: {}", e);
            return;
        }
    }

    // Frames are handled one at a time, in arrival order
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let messages = handler.handle_text(&text).await;
                if let Err(e) = send_all(&mut sender, messages).await {
                    error!("Failed to send response: {}", e);
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!("WebSocket client {} sent close frame", peer);
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Binary(_)) => {
                let error = vec![ServerMessage::error("Invalid data format. Please send JSON.")];
                if send_all(&mut sender, error).await.is_err() {
                    break;
                }
            }
            Ok(_) => {
                // Ignore pong messages
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", peer, e);
                break;
            }
        }
    }

    info!("WebSocket client {} disconnected", peer);
}

async fn send_all(
    sender: &mut SplitSink<WebSocket, Message>,
    messages: Vec<ServerMessage>,
) -> Result<(), ServerError> {
    for message in messages {
        let json = serde_json::to_string(&message)
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        sender
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ServerError::WebSocket(e.to_string()))?;
        debug!("Sent {:?}", message);
    }
    Ok(())
}
