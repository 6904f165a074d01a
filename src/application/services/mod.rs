//! Application services - Use case implementations
//!
//! The character store is the single owner of all character sheet state.
//! Infrastructure (HTTP routes, WebSocket handlers) calls into it and never
//! touches the collections directly.

pub mod character_store;

pub use character_store::{CharacterStore, CharacterUpdate, EquipmentUpdate, StoreError};
