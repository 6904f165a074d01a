//! Application layer - Use case implementations and API boundary types

pub mod dto;
pub mod services;
