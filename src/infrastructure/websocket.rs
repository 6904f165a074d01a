//! WebSocket handler for sheet mirror connections
//!
//! Clients connect once, then join the channels of the characters they want
//! mirrored. Every ability/equipment mutation committed through the REST API
//! is pushed to the joined channels as a tagged JSON event.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::application::dto::{AbilityResponseDto, EquipmentResponseDto};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::state::AppState;
use crate::infrastructure::subscriptions::ClientId;

/// Messages from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to a character's update channel
    JoinCharacter { character_id: u64 },
    /// Unsubscribe from a character's update channel
    LeaveCharacter { character_id: u64 },
    /// Heartbeat ping
    Heartbeat,
}

/// Messages from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once after the connection is established
    Connected { message: String },
    /// Confirmation of a channel join
    Joined { character_id: u64 },
    /// Confirmation of a channel leave
    Left { character_id: u64 },
    /// Heartbeat reply
    Pong,
    /// Protocol-level error
    Error { code: String, message: String },

    // Push events, scoped to the owning character's channel
    AbilityCreated {
        character_id: u64,
        ability: AbilityResponseDto,
    },
    AbilityUpdated {
        character_id: u64,
        ability: AbilityResponseDto,
    },
    AbilityDeleted {
        character_id: u64,
        ability_id: u64,
    },
    EquipmentCreated {
        character_id: u64,
        equipment: EquipmentResponseDto,
    },
    EquipmentUpdated {
        character_id: u64,
        equipment: EquipmentResponseDto,
    },
    EquipmentDeleted {
        character_id: u64,
        equipment_id: u64,
    },
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Create a unique client ID for this connection
    let client_id = ClientId::new();

    // Create a channel for sending messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    tracing::info!("New WebSocket connection established: {}", client_id);

    // Spawn a task to forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    let _ = tx.send(ServerMessage::Connected {
        message: "You are connected to the server".to_string(),
    });

    // Handle incoming messages
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => {
                    let response = handle_message(msg, &state, client_id, tx.clone()).await;
                    if tx.send(response).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to parse message: {}", e);
                    let error = ServerMessage::Error {
                        code: "PARSE_ERROR".to_string(),
                        message: format!("Invalid message format: {}", e),
                    };
                    if tx.send(error).is_err() {
                        break;
                    }
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!("WebSocket connection closed by client: {}", client_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                let _ = tx.send(ServerMessage::Pong);
            }
            Err(e) => {
                tracing::error!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up: drop all of this client's channel memberships
    {
        let mut subscriptions = state.subscriptions.write().await;
        subscriptions.drop_client(client_id);
    }

    // Cancel the send task
    send_task.abort();

    tracing::info!("WebSocket connection terminated: {}", client_id);
}

/// Handle a parsed client message
async fn handle_message(
    msg: ClientMessage,
    state: &AppState,
    client_id: ClientId,
    sender: mpsc::UnboundedSender<ServerMessage>,
) -> ServerMessage {
    match msg {
        ClientMessage::JoinCharacter { character_id } => {
            // Join always succeeds; the channel exists independently of the
            // character, so subscribing ahead of creation is allowed.
            let mut subscriptions = state.subscriptions.write().await;
            subscriptions.subscribe(CharacterId::from(character_id), client_id, sender);
            ServerMessage::Joined { character_id }
        }
        ClientMessage::LeaveCharacter { character_id } => {
            let mut subscriptions = state.subscriptions.write().await;
            subscriptions.unsubscribe(CharacterId::from(character_id), client_id);
            ServerMessage::Left { character_id }
        }
        ClientMessage::Heartbeat => ServerMessage::Pong,
    }
}
