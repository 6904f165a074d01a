//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: REST API routes
//! - WebSocket: Real-time sheet mirroring
//! - Subscriptions: Per-character channel membership
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod state;
pub mod subscriptions;
pub mod websocket;
