//! Subscription management for per-character update channels
//!
//! Every character sheet has an implicit channel keyed by its id. WebSocket
//! clients join and leave channels to mirror a sheet in real time; mutations
//! to a sheet's abilities or equipment are broadcast to exactly that
//! channel's members. Delivery is fire-and-forget: a failed send is logged
//! and never affects other members or the operation that triggered it.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::domain::value_objects::CharacterId;
use crate::infrastructure::websocket::ServerMessage;

/// Unique identifier for a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client subscribed to one character channel
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    pub client_id: ClientId,
    #[allow(dead_code)] // Kept for future subscription analytics
    pub joined_at: DateTime<Utc>,
    /// Channel to send messages to this client
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Tracks which clients are subscribed to which character channels
pub struct SubscriptionManager {
    /// Channel members by character id
    channels: HashMap<CharacterId, HashMap<ClientId, ChannelSubscriber>>,
    /// Reverse index: every channel a client belongs to
    client_channels: HashMap<ClientId, HashSet<CharacterId>>,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            client_channels: HashMap::new(),
        }
    }

    /// Subscribe a client to a character's channel.
    ///
    /// Joining a channel the client is already in just refreshes its sender;
    /// it is not an error. The character id is not validated here: a client
    /// may subscribe before the character exists and will simply receive
    /// nothing until it does.
    pub fn subscribe(
        &mut self,
        character_id: CharacterId,
        client_id: ClientId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) {
        let subscriber = ChannelSubscriber {
            client_id,
            joined_at: Utc::now(),
            sender,
        };
        self.channels
            .entry(character_id)
            .or_default()
            .insert(client_id, subscriber);
        self.client_channels
            .entry(client_id)
            .or_default()
            .insert(character_id);

        tracing::info!("Client {} joined channel for character {}", client_id, character_id);
    }

    /// Unsubscribe a client from a character's channel.
    ///
    /// Leaving a channel the client never joined is a no-op.
    pub fn unsubscribe(&mut self, character_id: CharacterId, client_id: ClientId) {
        if let Some(members) = self.channels.get_mut(&character_id) {
            if members.remove(&client_id).is_some() {
                tracing::info!(
                    "Client {} left channel for character {}",
                    client_id,
                    character_id
                );
            }
            if members.is_empty() {
                self.channels.remove(&character_id);
            }
        }
        if let Some(channels) = self.client_channels.get_mut(&client_id) {
            channels.remove(&character_id);
            if channels.is_empty() {
                self.client_channels.remove(&client_id);
            }
        }
    }

    /// Drop every channel membership a client holds. Called when the
    /// client's connection terminates.
    pub fn drop_client(&mut self, client_id: ClientId) {
        let Some(channels) = self.client_channels.remove(&client_id) else {
            return;
        };
        for character_id in &channels {
            if let Some(members) = self.channels.get_mut(character_id) {
                members.remove(&client_id);
                if members.is_empty() {
                    self.channels.remove(character_id);
                }
            }
        }
        tracing::info!(
            "Client {} disconnected, dropped {} channel membership(s)",
            client_id,
            channels.len()
        );
    }

    /// Deliver a message to every current member of a character's channel.
    ///
    /// No-op if nobody is subscribed. Sends are non-blocking; a send to a
    /// closed connection is logged and skipped.
    pub fn broadcast_to_channel(&self, character_id: CharacterId, message: &ServerMessage) {
        let Some(members) = self.channels.get(&character_id) else {
            return;
        };
        for subscriber in members.values() {
            if let Err(e) = subscriber.sender.send(message.clone()) {
                tracing::warn!(
                    "Failed to send message to client {}: {}",
                    subscriber.client_id,
                    e
                );
            }
        }
    }

    #[allow(dead_code)] // Exercised by tests; kept for future monitoring
    pub fn is_subscribed(&self, character_id: CharacterId, client_id: ClientId) -> bool {
        self.channels
            .get(&character_id)
            .is_some_and(|members| members.contains_key(&client_id))
    }

    /// Number of clients currently in a character's channel.
    #[allow(dead_code)] // Exercised by tests; kept for future monitoring
    pub fn subscriber_count(&self, character_id: CharacterId) -> usize {
        self.channels
            .get(&character_id)
            .map_or(0, |members| members.len())
    }

    /// Number of non-empty channels.
    #[allow(dead_code)] // Exercised by tests; kept for future monitoring
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
